//! Rain erosion: pointwise droplet impacts at random cells.

use crate::grid::Grid;
use crate::rng::RandomSource;

use super::ErosionParams;

pub(super) fn rain(grid: &mut Grid, params: &ErosionParams, rng: &mut RandomSource) {
    let r = grid.resolution;
    for _ in 0..params.droplets {
        let x = rng.index(r);
        let y = rng.index(r);
        let h = grid.get(x, y) - params.strength;
        grid.set(x, y, h);
    }
}
