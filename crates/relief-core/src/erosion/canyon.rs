//! Canyon carving: a meandering trench walked in from the west edge, with
//! branching side-carves.
//!
//! Each seed along the walk starts a branch carve at the local height minus
//! a fixed dig depth. Branches spread through six directional neighbours,
//! each step adding a small random bank slope to the target height, and die
//! off-grid, at the depth floor, or wherever the terrain is already at or
//! below the target. The branch spread uses an explicit work stack; the
//! visited pattern can cover a large share of the grid and would overflow
//! the call stack if done recursively.

use crate::grid::Grid;
use crate::rng::RandomSource;

const DIG_DEPTH: f32 = 0.05;
const BANK_SLOPE: f32 = 0.001;
const DEPTH_FLOOR: f32 = 0.0;

const BRANCH_DIRECTIONS: [(i64, i64); 6] = [(1, 0), (-1, 0), (1, 1), (-1, 1), (0, -1), (0, 1)];

pub(super) fn canyon(grid: &mut Grid, rng: &mut RandomSource) {
    let r = grid.resolution as i64;

    let mut cx: i64 = 1;
    let mut cy: i64 = if r > 20 {
        rng.range_i32(10, (r - 10) as i32) as i64
    } else {
        rng.index(r as usize) as i64
    };

    while cy >= 0 && cy < r && cx > 0 && cx < r {
        let target = grid.get(cx as usize, cy as usize) - DIG_DEPTH;
        carve_branch(grid, cx, cy, target, rng);
        cx += rng.range_i32(1, 3) as i64;
        cy += rng.range_i32(-2, 3) as i64;
    }
}

fn carve_branch(grid: &mut Grid, x: i64, y: i64, target: f32, rng: &mut RandomSource) {
    let r = grid.resolution as i64;
    let mut stack: Vec<(i64, i64, f32)> = vec![(x, y, target)];

    while let Some((x, y, target)) = stack.pop() {
        if x < 0 || x >= r || y < 0 || y >= r {
            continue;
        }
        if target <= DEPTH_FLOOR {
            continue;
        }
        if grid.get(x as usize, y as usize) <= target {
            continue;
        }

        grid.set(x as usize, y as usize, target);

        for (dx, dy) in BRANCH_DIRECTIONS {
            let step = rng.uniform(BANK_SLOPE, BANK_SLOPE + 0.01);
            stack.push((x + dx, y + dy, target + step));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carving_never_raises_terrain() {
        let before = Grid::filled(33, 0.5);
        let mut after = before.clone();
        let mut rng = RandomSource::from_seed(1);
        canyon(&mut after, &mut rng);
        for i in 0..before.data.len() {
            assert!(after.data[i] <= before.data[i], "cell {i} was raised");
        }
    }

    #[test]
    fn carves_at_least_the_first_seed() {
        let mut grid = Grid::filled(33, 0.5);
        let mut rng = RandomSource::from_seed(9);
        canyon(&mut grid, &mut rng);
        assert!(grid.min_height() < 0.5, "no trench was carved");
    }

    #[test]
    fn carved_cells_stay_above_the_depth_floor() {
        let mut grid = Grid::filled(65, 0.4);
        let mut rng = RandomSource::from_seed(33);
        canyon(&mut grid, &mut rng);
        assert!(grid.min_height() > DEPTH_FLOOR);
    }

    #[test]
    fn terminates_on_large_deep_grids() {
        // The branch spread covers big regions on a tall flat grid; the
        // explicit work stack has to handle that without overflowing.
        let mut grid = Grid::filled(129, 1.0);
        let mut rng = RandomSource::from_seed(5);
        canyon(&mut grid, &mut rng);
        assert!(grid.data.iter().all(|h| h.is_finite()));
    }
}
