//! Integration tests for view-offset tiling
//!
//! Splits an 800x600 virtual viewport into a 2x2 grid of 400x300 tiles and
//! checks that the tile frusta partition the full frustum: shared edges are
//! the same plane seen from both sides, outer edges match the full frustum,
//! and unprojected seam points coincide.
//!
//! Run with: cargo test --test view_offset_integration_tests

use hybrid_view::glam::{Vec3, Vec4};
use hybrid_view::hybrid::camera::{
    CameraDesc, Frustum, HybridCamera, ProjectionMode, ViewOffset,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};

const FULL_WIDTH: f32 = 800.0;
const FULL_HEIGHT: f32 = 600.0;
const TILE_WIDTH: f32 = 400.0;
const TILE_HEIGHT: f32 = 300.0;

// ============================================================================
// HELPERS
// ============================================================================

fn full_camera(mode: ProjectionMode) -> HybridCamera {
    HybridCamera::from_desc(CameraDesc {
        projection_mode: mode,
        width: FULL_WIDTH,
        height: FULL_HEIGHT,
        ..Default::default()
    })
    .unwrap()
}

fn tile_camera(mode: ProjectionMode, offset_x: f32, offset_y: f32) -> HybridCamera {
    let mut camera = full_camera(mode);
    camera
        .set_view_offset(ViewOffset::new(
            FULL_WIDTH,
            FULL_HEIGHT,
            offset_x,
            offset_y,
            TILE_WIDTH,
            TILE_HEIGHT,
        ))
        .unwrap();
    camera
}

/// Top-left, top-right, bottom-left, bottom-right
fn tile_frusta(mode: ProjectionMode) -> [Frustum; 4] {
    [
        tile_camera(mode, 0.0, 0.0).frustum(),
        tile_camera(mode, TILE_WIDTH, 0.0).frustum(),
        tile_camera(mode, 0.0, TILE_HEIGHT).frustum(),
        tile_camera(mode, TILE_WIDTH, TILE_HEIGHT).frustum(),
    ]
}

fn assert_plane_eq(actual: Vec4, expected: Vec4, what: &str) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "{}: {:?} != {:?}",
        what,
        actual,
        expected
    );
}

fn assert_seams(tiles: &[Frustum; 4]) {
    let [top_left, top_right, bottom_left, bottom_right] = tiles;

    // Vertical seam
    assert_plane_eq(top_left.planes[PLANE_RIGHT], -top_right.planes[PLANE_LEFT], "top vertical seam");
    assert_plane_eq(bottom_left.planes[PLANE_RIGHT], -bottom_right.planes[PLANE_LEFT], "bottom vertical seam");

    // Horizontal seam
    assert_plane_eq(top_left.planes[PLANE_BOTTOM], -bottom_left.planes[PLANE_TOP], "left horizontal seam");
    assert_plane_eq(top_right.planes[PLANE_BOTTOM], -bottom_right.planes[PLANE_TOP], "right horizontal seam");
}

fn assert_outer_edges(tiles: &[Frustum; 4], full: &Frustum) {
    let [top_left, top_right, bottom_left, bottom_right] = tiles;

    assert_plane_eq(top_left.planes[PLANE_LEFT], full.planes[PLANE_LEFT], "top-left left");
    assert_plane_eq(bottom_left.planes[PLANE_LEFT], full.planes[PLANE_LEFT], "bottom-left left");
    assert_plane_eq(top_right.planes[PLANE_RIGHT], full.planes[PLANE_RIGHT], "top-right right");
    assert_plane_eq(bottom_right.planes[PLANE_RIGHT], full.planes[PLANE_RIGHT], "bottom-right right");
    assert_plane_eq(top_left.planes[PLANE_TOP], full.planes[PLANE_TOP], "top-left top");
    assert_plane_eq(top_right.planes[PLANE_TOP], full.planes[PLANE_TOP], "top-right top");
    assert_plane_eq(bottom_left.planes[PLANE_BOTTOM], full.planes[PLANE_BOTTOM], "bottom-left bottom");
    assert_plane_eq(bottom_right.planes[PLANE_BOTTOM], full.planes[PLANE_BOTTOM], "bottom-right bottom");

    for tile in tiles {
        assert_plane_eq(tile.planes[PLANE_NEAR], full.planes[PLANE_NEAR], "near");
        assert_plane_eq(tile.planes[PLANE_FAR], full.planes[PLANE_FAR], "far");
    }
}

fn sample_points(depth: f32, half_width: f32, half_height: f32) -> Vec<Vec3> {
    let mut points = Vec::new();
    // Off the seams so every sample belongs to exactly one tile
    for ix in 0..8 {
        for iy in 0..6 {
            let x = -half_width + (ix as f32 + 0.5) * (2.0 * half_width / 8.0);
            let y = -half_height + (iy as f32 + 0.5) * (2.0 * half_height / 6.0);
            points.push(Vec3::new(x * 0.97, y * 0.97, depth));
        }
    }
    points
}

// ============================================================================
// PERSPECTIVE TILING
// ============================================================================

#[test]
fn test_integration_perspective_tiles_share_seams() {
    let tiles = tile_frusta(ProjectionMode::Perspective);
    assert_seams(&tiles);
}

#[test]
fn test_integration_perspective_tiles_match_full_edges() {
    let tiles = tile_frusta(ProjectionMode::Perspective);
    let full = full_camera(ProjectionMode::Perspective).frustum();
    assert_outer_edges(&tiles, &full);
}

#[test]
fn test_integration_perspective_tiles_partition_samples() {
    let tiles = tile_frusta(ProjectionMode::Perspective);
    let full_camera = full_camera(ProjectionMode::Perspective);
    let full = full_camera.frustum();

    // Half extents of the full frustum at depth 10
    let depth = -10.0;
    let corner = full_camera.projection_matrix_inverse().project_point3(Vec3::new(1.0, 1.0, -1.0));
    let scale = depth / corner.z;
    let points = sample_points(depth, corner.x * scale, corner.y * scale);

    for point in points {
        assert!(full.contains_point(point), "{:?} should be in the full frustum", point);
        let owners = tiles.iter().filter(|tile| tile.contains_point(point)).count();
        assert_eq!(owners, 1, "{:?} should belong to exactly one tile", point);
    }
}

#[test]
fn test_integration_perspective_seam_unprojection() {
    let top_left = tile_camera(ProjectionMode::Perspective, 0.0, 0.0);
    let top_right = tile_camera(ProjectionMode::Perspective, TILE_WIDTH, 0.0);
    let bottom_left = tile_camera(ProjectionMode::Perspective, 0.0, TILE_HEIGHT);

    for y in [-1.0, -0.25, 0.5, 1.0] {
        let from_left = top_left.projection_matrix_inverse().project_point3(Vec3::new(1.0, y, -1.0));
        let from_right = top_right.projection_matrix_inverse().project_point3(Vec3::new(-1.0, y, -1.0));
        assert!(from_left.abs_diff_eq(from_right, 1e-5), "{:?} != {:?}", from_left, from_right);
    }

    for x in [-1.0, 0.0, 0.75] {
        let from_top = top_left.projection_matrix_inverse().project_point3(Vec3::new(x, -1.0, 0.5));
        let from_bottom = bottom_left.projection_matrix_inverse().project_point3(Vec3::new(x, 1.0, 0.5));
        assert!(from_top.abs_diff_eq(from_bottom, 1e-3), "{:?} != {:?}", from_top, from_bottom);
    }
}

#[test]
fn test_integration_perspective_tile_keeps_full_aspect() {
    let tile = tile_camera(ProjectionMode::Perspective, TILE_WIDTH, TILE_HEIGHT);
    let full = full_camera(ProjectionMode::Perspective);

    assert_eq!(tile.aspect(), full.aspect());
    assert_eq!(tile.fov(), full.fov());
    assert_eq!(tile.size(), (FULL_WIDTH, FULL_HEIGHT));
}

// ============================================================================
// ORTHOGRAPHIC TILING
// ============================================================================

#[test]
fn test_integration_orthographic_tiles_share_seams() {
    let tiles = tile_frusta(ProjectionMode::Orthographic);
    assert_seams(&tiles);
}

#[test]
fn test_integration_orthographic_tiles_match_full_edges() {
    let tiles = tile_frusta(ProjectionMode::Orthographic);
    let full = full_camera(ProjectionMode::Orthographic).frustum();
    assert_outer_edges(&tiles, &full);
}

#[test]
fn test_integration_orthographic_tiles_partition_samples() {
    let tiles = tile_frusta(ProjectionMode::Orthographic);
    let full = full_camera(ProjectionMode::Orthographic).frustum();

    // Default rig at zoom 1: the view spans the full 800x600 extents
    for point in sample_points(-100.0, 0.5 * FULL_WIDTH, 0.5 * FULL_HEIGHT) {
        assert!(full.contains_point(point), "{:?} should be in the full frustum", point);
        let owners = tiles.iter().filter(|tile| tile.contains_point(point)).count();
        assert_eq!(owners, 1, "{:?} should belong to exactly one tile", point);
    }
}

#[test]
fn test_integration_orthographic_tiles_follow_zoom() {
    let mut top_right = tile_camera(ProjectionMode::Orthographic, TILE_WIDTH, 0.0);
    top_right.host_mut().position = Vec3::new(0.0, 0.0, 2000.0);
    top_right.update_projection_matrix().unwrap();

    let mut full = full_camera(ProjectionMode::Orthographic);
    full.host_mut().position = Vec3::new(0.0, 0.0, 2000.0);
    full.update_projection_matrix().unwrap();

    // Zoom 2: the right edge moves out to x = 800
    let right_edge = top_right.projection_matrix_inverse().project_point3(Vec3::new(1.0, 1.0, 0.0));
    assert!((right_edge.x - FULL_WIDTH).abs() < 1e-2);
    assert!((right_edge.y - FULL_HEIGHT).abs() < 1e-2);
    assert_plane_eq(
        top_right.frustum().planes[PLANE_RIGHT],
        full.frustum().planes[PLANE_RIGHT],
        "zoomed right edge",
    );
}

// ============================================================================
// CLEARING THE OFFSET
// ============================================================================

#[test]
fn test_integration_clear_view_offset_restores_full_frustum() {
    let mut tile = tile_camera(ProjectionMode::Perspective, TILE_WIDTH, TILE_HEIGHT);
    tile.clear_view_offset().unwrap();

    let full = full_camera(ProjectionMode::Perspective);
    assert!(tile.projection_matrix().abs_diff_eq(*full.projection_matrix(), 1e-6));
    assert!(tile.view_offset().is_none());
}
