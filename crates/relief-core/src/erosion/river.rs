//! Hydraulic river erosion: droplets run downhill as random walks,
//! accumulating carve depth into a transient erosion map that is
//! subtracted from the grid once all droplets have finished.

use crate::grid::Grid;
use crate::rng::RandomSource;

use super::ErosionParams;

pub(super) fn river(grid: &mut Grid, params: &ErosionParams, rng: &mut RandomSource) {
    let r = grid.resolution;
    let mut erosion_map = vec![0.0f32; r * r];

    for _ in 0..params.droplets {
        let seed = (rng.index(r), rng.index(r));
        erosion_map[seed.0 * r + seed.1] = params.strength;
        for _ in 0..params.springs_per_river {
            run_spring(grid, &mut erosion_map, seed, params.solubility, rng);
        }
    }

    for (i, &carve) in erosion_map.iter().enumerate() {
        if carve > 0.0 {
            grid.data[i] -= carve;
        }
    }
}

/// One spring traversal: walk to a randomly-chosen strictly lower neighbour,
/// carrying `current − solubility` into it; with no lower neighbour, decay
/// in place. Stops once the carried erosion reaches zero. Terminates because
/// every step moves strictly downhill and in-place decay is strictly
/// positive.
fn run_spring(
    grid: &Grid,
    erosion_map: &mut [f32],
    seed: (usize, usize),
    solubility: f32,
    rng: &mut RandomSource,
) {
    let r = grid.resolution;
    let (mut cx, mut cy) = seed;
    while erosion_map[cx * r + cy] > 0.0 {
        let mut neighbors = grid.neighbors(cx, cy);
        rng.shuffle(&mut neighbors);

        let mut stepped = false;
        for &(nx, ny) in &neighbors {
            if grid.get(nx, ny) < grid.get(cx, cy) {
                erosion_map[nx * r + ny] = erosion_map[cx * r + cy] - solubility;
                cx = nx;
                cy = ny;
                stepped = true;
                break;
            }
        }
        if !stepped {
            erosion_map[cx * r + cy] -= solubility;
        }
    }
}
