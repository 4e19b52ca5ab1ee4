//! Wind erosion: directional sediment transport at a fixed 30° wind angle.
//!
//! Scans an extended lattice (twice the grid extent on every side) in
//! wind-aligned coordinates, stride 10 along the wind and 1 across it.
//! Each scan point digs a small fixed amount from a source cell and piles
//! it on a destination cell further along the wind, both jittered
//! vertically by a coherent-noise offset. Transfers only happen when both
//! cells land inside the grid, so the pass conserves mass.

use crate::grid::Grid;
use crate::noise::fbm::BaseNoise;
use crate::rng::RandomSource;

use super::ErosionParams;

const WIND_ANGLE_DEG: f32 = 30.0;
const TRANSPORT: f32 = 0.001;

pub(super) fn wind(grid: &mut Grid, params: &ErosionParams, rng: &mut RandomSource) {
    let r = grid.resolution as i64;
    let jitter = BaseNoise::new(rng.derive_seed());

    let sin_a = -WIND_ANGLE_DEG.to_radians().sin();
    let cos_a = WIND_ANGLE_DEG.to_radians().cos();

    let mut y = -(r - 1) * 2;
    while y <= r * 2 {
        let mut x = -(r - 1) * 2;
        while x <= r * 2 {
            let offset =
                (jitter.sample01(x as f32 * 0.06, y as f32 * 0.06) * 20.0 * params.strength) as i64;
            let dig_y = y + offset;
            let pile_y = y + 5 + offset;

            let dig = rotate(x, dig_y, sin_a, cos_a);
            let pile = rotate(x, pile_y, sin_a, cos_a);

            if let (Some(dig), Some(pile)) = (to_cell(dig, r), to_cell(pile, r)) {
                let dug = grid.get(dig.0, dig.1) - TRANSPORT;
                grid.set(dig.0, dig.1, dug);
                let piled = grid.get(pile.0, pile.1) + TRANSPORT;
                grid.set(pile.0, pile.1, piled);
            }
            x += 1;
        }
        y += 10;
    }
}

#[inline]
fn rotate(x: i64, y: i64, sin_a: f32, cos_a: f32) -> (f32, f32) {
    let (x, y) = (x as f32, y as f32);
    (x * cos_a - y * sin_a, y * cos_a + x * sin_a)
}

/// Truncate rotated coordinates to a grid cell; `None` when outside bounds.
#[inline]
fn to_cell(coords: (f32, f32), r: i64) -> Option<(usize, usize)> {
    let max = (r - 1) as f32;
    if coords.0 < 0.0 || coords.0 > max || coords.1 < 0.0 || coords.1 > max {
        return None;
    }
    Some((coords.0 as usize, coords.1 as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transport_conserves_total_mass() {
        let mut grid = Grid::filled(33, 0.5);
        let before: f32 = grid.data.iter().sum();
        let params = ErosionParams { strength: 0.1, ..ErosionParams::default() };
        let mut rng = RandomSource::from_seed(8);
        wind(&mut grid, &params, &mut rng);
        let after: f32 = grid.data.iter().sum();
        assert_relative_eq!(before, after, max_relative = 1e-3);
    }

    #[test]
    fn some_cells_are_dug_and_some_piled() {
        let mut grid = Grid::filled(33, 0.5);
        let params = ErosionParams { strength: 0.1, ..ErosionParams::default() };
        let mut rng = RandomSource::from_seed(8);
        wind(&mut grid, &params, &mut rng);
        assert!(grid.data.iter().any(|&h| h < 0.5), "nothing was dug");
        assert!(grid.data.iter().any(|&h| h > 0.5), "nothing was piled");
    }

    #[test]
    fn out_of_grid_cells_are_rejected() {
        assert_eq!(to_cell((-0.5, 3.0), 9), None);
        assert_eq!(to_cell((8.1, 3.0), 9), None);
        assert_eq!(to_cell((3.4, 7.9), 9), Some((3, 7)));
    }
}
