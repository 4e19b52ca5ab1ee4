//! Tidal erosion: flattens shoreline boundaries to sea level.
//!
//! Any cell below `water_height` adjacent to a cell above it is pulled up
//! to the water line, and the higher neighbour is pulled down to it. The
//! pass is idempotent: a second application with the same water height is
//! a no-op.

use crate::grid::Grid;

use super::ErosionParams;

pub(super) fn tidal(grid: &mut Grid, params: &ErosionParams) {
    let r = grid.resolution;
    let water = params.water_height;
    for y in 0..r {
        for x in 0..r {
            for (nx, ny) in grid.neighbors(x, y) {
                if grid.get(x, y) < water && grid.get(nx, ny) > water {
                    grid.set(x, y, water);
                    grid.set(nx, ny, water);
                }
            }
        }
    }
}
