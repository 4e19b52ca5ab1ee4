//! Thermal erosion: material slides from a cell to any neighbour sitting
//! more than the talus threshold (`strength`) below it.
//!
//! Transfers mutate the live grid in raster order, so a cell processed
//! later in the same pass can observe material already moved earlier.
//! Sequential rather than simultaneous semantics; a deliberate modelling
//! choice, not a defect.

use crate::grid::Grid;

use super::ErosionParams;

pub(super) fn thermal(grid: &mut Grid, params: &ErosionParams) {
    let r = grid.resolution;
    for y in 0..r {
        for x in 0..r {
            for (nx, ny) in grid.neighbors(x, y) {
                let current = grid.get(x, y);
                if current > grid.get(nx, ny) + params.strength {
                    let moved = current * params.amount;
                    grid.set(x, y, current - moved);
                    grid.set(nx, ny, grid.get(nx, ny) + moved);
                }
            }
        }
    }
}
