//! Neighbour-averaging smoothing.
//!
//! Each pass replaces every cell with the mean of itself and its distinct
//! clamped neighbours. Passes are double-buffered: a pass reads the
//! previous pass's fully updated grid, so the result has no raster-order
//! directional bias.

use crate::grid::Grid;

/// Apply `passes` sequential averaging passes. `passes = 0` is a no-op.
pub fn smooth(grid: &mut Grid, passes: u32) {
    let r = grid.resolution;
    for _ in 0..passes {
        let prev = grid.data.clone();
        for y in 0..r {
            for x in 0..r {
                let neighbors = grid.neighbors(x, y);
                let mut avg = prev[x * r + y];
                for &(nx, ny) in &neighbors {
                    avg += prev[nx * r + ny];
                }
                grid.set(x, y, avg / (neighbors.len() + 1) as f32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_passes_is_a_no_op() {
        let mut grid = Grid::new(5);
        grid.set(2, 2, 1.0);
        let before = grid.clone();
        smooth(&mut grid, 0);
        assert_eq!(grid.data, before.data);
    }

    #[test]
    fn flat_grid_is_a_fixed_point() {
        let mut grid = Grid::filled(9, 0.42);
        smooth(&mut grid, 5);
        for &h in &grid.data {
            assert_relative_eq!(h, 0.42, max_relative = 1e-6);
        }
    }

    #[test]
    fn isolated_spike_spreads_to_neighbors() {
        let mut grid = Grid::new(5);
        grid.set(2, 2, 0.9);
        smooth(&mut grid, 1);
        // Spike centre averaged over 9 cells.
        assert_relative_eq!(grid.get(2, 2), 0.1, max_relative = 1e-5);
        // Each interior neighbour picked up a share.
        assert_relative_eq!(grid.get(1, 1), 0.1, max_relative = 1e-5);
        assert_relative_eq!(grid.get(2, 1), 0.1, max_relative = 1e-5);
        // Cells two steps away are untouched after one pass.
        assert_eq!(grid.get(0, 0), 0.0);
    }

    #[test]
    fn smoothing_preserves_symmetry() {
        // Double-buffered passes must keep a symmetric input symmetric;
        // in-place raster updates would break this.
        let mut grid = Grid::new(9);
        grid.set(4, 4, 1.0);
        smooth(&mut grid, 3);
        let r = grid.resolution;
        for x in 0..r {
            for y in 0..r {
                let mirrored = grid.get(r - 1 - x, r - 1 - y);
                assert_relative_eq!(grid.get(x, y), mirrored, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn smoothing_reduces_total_relief() {
        let mut grid = Grid::new(9);
        for x in 0..9 {
            for y in 0..9 {
                grid.set(x, y, if (x + y) % 2 == 0 { 1.0 } else { 0.0 });
            }
        }
        let before = grid.max_height() - grid.min_height();
        smooth(&mut grid, 2);
        let after = grid.max_height() - grid.min_height();
        assert!(after < before);
    }
}
