//! Midpoint displacement (diamond-square) fractal generator.
//!
//! Works on a (2^k)+1 grid: the square size starts at R−1 and halves each
//! iteration, so the pass terminates after exactly log2(R−1) iterations.
//! Each iteration displaces square centres from their corners, then edge
//! midpoints from the surrounding diamond; midpoints whose outer diamond
//! neighbours leave the grid are skipped. The final size-1 square pass
//! degenerates to covering every cell below the far row and column, so
//! only that row and column keep their initial heights.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::Grid;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplacementParams {
    pub height_min: f32,
    pub height_max: f32,
    /// Base of the per-iteration displacement decay.
    pub dampener_power: f32,
    /// Exponent of the decay: each iteration scales the displacement range
    /// by `dampener_power^(−roughness)`.
    pub roughness: f32,
}

impl Default for DisplacementParams {
    fn default() -> Self {
        Self {
            height_min: -2.0,
            height_max: 2.0,
            dampener_power: 2.0,
            roughness: 2.0,
        }
    }
}

/// Run one full midpoint-displacement pass over the grid.
///
/// The resolution must be (2^k)+1 with k ≥ 1; anything else fails with
/// [`TerrainError::InvalidResolution`] before the grid is touched.
pub fn midpoint_displacement(
    grid: &mut Grid,
    params: &DisplacementParams,
    rng: &mut RandomSource,
) -> Result<()> {
    let r = grid.resolution;
    if r < 3 || !(r - 1).is_power_of_two() {
        return Err(TerrainError::InvalidResolution { resolution: r });
    }
    for (name, value) in [
        ("height_min", params.height_min),
        ("height_max", params.height_max),
        ("dampener_power", params.dampener_power),
        ("roughness", params.roughness),
    ] {
        if !value.is_finite() {
            return Err(TerrainError::InvalidParameter { name, value });
        }
    }
    if params.height_min > params.height_max {
        return Err(TerrainError::InvalidParameter { name: "height_min", value: params.height_min });
    }
    // A non-positive decay base turns the displacement bounds NaN on the
    // first halving, which would poison the grid mid-pass.
    if params.dampener_power <= 0.0 {
        return Err(TerrainError::InvalidParameter {
            name: "dampener_power",
            value: params.dampener_power,
        });
    }

    let width = r - 1;
    let mut square_size = width;
    let mut height_min = params.height_min;
    let mut height_max = params.height_max;
    let dampener = params.dampener_power.powf(-params.roughness);

    while square_size > 0 {
        // Square pass: centre of each square from its four corners.
        for x in (0..width).step_by(square_size) {
            for y in (0..width).step_by(square_size) {
                let corner_x = x + square_size;
                let corner_y = y + square_size;
                let mid_x = x + square_size / 2;
                let mid_y = y + square_size / 2;

                let avg = (grid.get(x, y)
                    + grid.get(corner_x, y)
                    + grid.get(x, corner_y)
                    + grid.get(corner_x, corner_y))
                    / 4.0;
                grid.set(mid_x, mid_y, avg + rng.uniform(height_min, height_max));
            }
        }

        // Diamond pass: edge midpoints from the two adjacent square centres
        // and two corners. Midpoints whose outer diamond points fall outside
        // the grid are skipped.
        for x in (0..width).step_by(square_size) {
            for y in (0..width).step_by(square_size) {
                let corner_x = x + square_size;
                let corner_y = y + square_size;
                let mid_x = x + square_size / 2;
                let mid_y = y + square_size / 2;

                let outer_xl = mid_x as i64 - square_size as i64;
                let outer_xr = (mid_x + square_size) as i64;
                let outer_yu = (mid_y + square_size) as i64;
                let outer_yd = mid_y as i64 - square_size as i64;
                let limit = width as i64 - 1;

                if outer_xl <= 0 || outer_yd <= 0 || outer_xr >= limit || outer_yu >= limit {
                    continue;
                }
                let (outer_xl, outer_xr) = (outer_xl as usize, outer_xr as usize);
                let (outer_yu, outer_yd) = (outer_yu as usize, outer_yd as usize);

                // Bottom edge midpoint.
                let avg = (grid.get(mid_x, mid_y)
                    + grid.get(x, y)
                    + grid.get(mid_x, outer_yd)
                    + grid.get(corner_x, y))
                    / 4.0;
                grid.set(mid_x, y, avg + rng.uniform(height_min, height_max));

                // Top edge midpoint.
                let avg = (grid.get(x, corner_y)
                    + grid.get(mid_x, mid_y)
                    + grid.get(corner_x, corner_y)
                    + grid.get(mid_x, outer_yu))
                    / 4.0;
                grid.set(mid_x, corner_y, avg + rng.uniform(height_min, height_max));

                // Left edge midpoint.
                let avg = (grid.get(x, y)
                    + grid.get(outer_xl, mid_y)
                    + grid.get(x, corner_y)
                    + grid.get(mid_x, mid_y))
                    / 4.0;
                grid.set(x, mid_y, avg + rng.uniform(height_min, height_max));

                // Right edge midpoint.
                let avg = (grid.get(mid_x, y)
                    + grid.get(mid_x, mid_y)
                    + grid.get(corner_x, corner_y)
                    + grid.get(outer_xr, mid_y))
                    / 4.0;
                grid.set(corner_x, mid_y, avg + rng.uniform(height_min, height_max));
            }
        }

        square_size /= 2;
        height_min *= dampener;
        height_max *= dampener;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_plus_one_resolution() {
        let mut rng = RandomSource::from_seed(0);
        for r in [4usize, 6, 8, 10, 100] {
            let mut grid = Grid::filled(r, 0.5);
            let err = midpoint_displacement(&mut grid, &DisplacementParams::default(), &mut rng)
                .unwrap_err();
            assert_eq!(err, TerrainError::InvalidResolution { resolution: r });
            assert!(grid.data.iter().all(|&h| h == 0.5), "grid mutated on error");
        }
    }

    #[test]
    fn negative_dampener_power_is_rejected_without_mutation() {
        // dampener_power^(−roughness) is NaN for a negative base with
        // fractional roughness; the pass must refuse it before touching
        // the grid rather than poisoning the displacement bounds mid-run.
        let params = DisplacementParams {
            dampener_power: -2.0,
            roughness: 0.5,
            ..DisplacementParams::default()
        };
        let mut rng = RandomSource::from_seed(3);
        let mut grid = Grid::filled(9, 0.5);
        let err = midpoint_displacement(&mut grid, &params, &mut rng).unwrap_err();
        assert_eq!(err, TerrainError::InvalidParameter { name: "dampener_power", value: -2.0 });
        assert!(grid.data.iter().all(|&h| h == 0.5), "grid mutated on error");
    }

    #[test]
    fn non_finite_params_are_rejected() {
        let mut rng = RandomSource::from_seed(3);
        let mut grid = Grid::filled(9, 0.5);
        for params in [
            DisplacementParams { height_min: f32::NAN, ..DisplacementParams::default() },
            DisplacementParams { height_max: f32::INFINITY, ..DisplacementParams::default() },
            DisplacementParams { roughness: f32::NAN, ..DisplacementParams::default() },
        ] {
            assert!(midpoint_displacement(&mut grid, &params, &mut rng).is_err());
            assert!(grid.data.iter().all(|&h| h == 0.5), "grid mutated on error");
        }
    }

    #[test]
    fn accepts_power_of_two_plus_one_resolutions() {
        let mut rng = RandomSource::from_seed(0);
        for r in [3usize, 5, 9, 17, 33, 65] {
            let mut grid = Grid::new(r);
            assert!(midpoint_displacement(&mut grid, &DisplacementParams::default(), &mut rng).is_ok());
        }
    }

    #[test]
    fn far_corners_are_never_displaced() {
        let mut rng = RandomSource::from_seed(42);
        let mut grid = Grid::new(17);
        midpoint_displacement(&mut grid, &DisplacementParams::default(), &mut rng).unwrap();
        let last = grid.resolution - 1;
        // The far row and column sit outside every square origin, so their
        // corners keep the seed height.
        assert_eq!(grid.get(0, last), 0.0);
        assert_eq!(grid.get(last, 0), 0.0);
        assert_eq!(grid.get(last, last), 0.0);
    }

    #[test]
    fn final_square_pass_touches_every_non_border_cell() {
        // A constant positive displacement (min == max == 1) guarantees every
        // written cell ends strictly positive, so untouched cells are exactly
        // the zero ones.
        let params = DisplacementParams {
            height_min: 1.0,
            height_max: 1.0,
            dampener_power: 2.0,
            roughness: 0.0,
        };
        let mut rng = RandomSource::from_seed(7);
        let mut grid = Grid::new(17);
        midpoint_displacement(&mut grid, &params, &mut rng).unwrap();
        let width = grid.resolution - 1;
        for x in 0..width {
            for y in 0..width {
                assert!(grid.get(x, y) > 0.0, "cell ({x}, {y}) never displaced");
            }
        }
    }

    #[test]
    fn roughness_damps_later_iterations() {
        // With strong damping the total relief stays close to the first
        // iteration's range; with none it keeps accumulating.
        let mut damped_rng = RandomSource::from_seed(21);
        let mut rough_rng = RandomSource::from_seed(21);

        let damped_params = DisplacementParams { height_min: 0.0, height_max: 1.0, dampener_power: 2.0, roughness: 4.0 };
        let rough_params = DisplacementParams { height_min: 0.0, height_max: 1.0, dampener_power: 2.0, roughness: 0.0 };

        let mut damped = Grid::new(33);
        let mut rough = Grid::new(33);
        midpoint_displacement(&mut damped, &damped_params, &mut damped_rng).unwrap();
        midpoint_displacement(&mut rough, &rough_params, &mut rough_rng).unwrap();

        assert!(damped.max_height() < rough.max_height());
    }
}
