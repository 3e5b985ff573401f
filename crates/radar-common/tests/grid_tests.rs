//! Index conversion tests for GridSpec.

use radar_common::GridSpec;
use test_utils::assert_coords_approx_eq;

// ============================================================================
// Array index tests
// ============================================================================

#[test]
fn test_array_index_roundtrip_all_points() {
    let grid = GridSpec::new(7, 4, 3, 1.0, 1.0, 0.5, 0.0, 0.0, 1.0);

    for iz in 0..grid.nz {
        for iy in 0..grid.ny {
            for ix in 0..grid.nx {
                let idx = grid.xy_index_to_array_index(ix, iy, iz).unwrap();
                assert_eq!(grid.array_index_to_xy_index(idx), Some((ix, iy, iz)));
            }
        }
    }
}

#[test]
fn test_array_index_is_row_major() {
    let grid = GridSpec::new_2d(10, 10, 1.0, 1.0, 0.0, 0.0);
    assert_eq!(grid.xy_index_to_array_index(0, 0, 0), Some(0));
    assert_eq!(grid.xy_index_to_array_index(3, 0, 0), Some(3));
    assert_eq!(grid.xy_index_to_array_index(0, 1, 0), Some(10));
    assert_eq!(grid.xy_index_to_array_index(9, 9, 0), Some(99));
}

#[test]
fn test_array_index_out_of_bounds() {
    let grid = GridSpec::new(5, 6, 2, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0);
    assert_eq!(grid.xy_index_to_array_index(5, 0, 0), None);
    assert_eq!(grid.xy_index_to_array_index(0, 6, 0), None);
    assert_eq!(grid.xy_index_to_array_index(0, 0, 2), None);
    assert_eq!(grid.array_index_to_xy_index(grid.len()), None);
}

// ============================================================================
// Coordinate tests
// ============================================================================

#[test]
fn test_index_to_xy() {
    let grid = GridSpec::new(20, 20, 3, 0.5, 0.25, 1.5, -5.0, 2.0, 0.5);
    assert_coords_approx_eq!(grid.index_to_xy(0, 0), (-5.0, 2.0), 1e-12);
    assert_coords_approx_eq!(grid.index_to_xy(4, 8), (-3.0, 4.0), 1e-12);
    assert!((grid.index_to_z(2) - 3.5).abs() < 1e-12);
}

#[test]
fn test_xy_index_roundtrip() {
    let grid = GridSpec::new_2d(30, 40, 1.5, 2.5, -20.0, -50.0);
    for iy in (0..grid.ny).step_by(7) {
        for ix in (0..grid.nx).step_by(5) {
            let (x, y) = grid.index_to_xy(ix, iy);
            assert_eq!(grid.xy_to_index(x, y), Some((ix, iy)));
        }
    }
}

#[test]
fn test_negative_spacing() {
    // Rows running north to south
    let grid = GridSpec::new_2d(4, 4, 1.0, -1.0, 0.0, 3.0);
    assert_eq!(grid.xy_to_index(0.0, 3.0), Some((0, 0)));
    assert_eq!(grid.xy_to_index(2.0, 0.0), Some((2, 3)));
    assert_eq!(grid.xy_to_index(0.0, 4.0), None);
}
