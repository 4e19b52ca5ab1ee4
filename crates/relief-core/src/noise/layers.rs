//! fBM noise layers and the ordered layer stack.
//!
//! A terrain is usually built from several layers summed into the grid;
//! the stack is never allowed to go empty (removing the last layer
//! reinstates a default one), so a "remove everything" edit leaves the
//! host with a workable configuration instead of a dead control surface.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::Grid;
use crate::noise::fbm::BaseNoise;
use crate::rng::RandomSource;

/// One fBM synthesis layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseLayer {
    pub x_scale: f32,
    pub y_scale: f32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub octaves: u32,
    pub persistence: f32,
    pub height_scale: f32,
    /// Marks the layer for deletion on the next `remove_flagged` sweep.
    pub remove: bool,
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self {
            x_scale: 0.01,
            y_scale: 0.01,
            offset_x: 0,
            offset_y: 0,
            octaves: 3,
            persistence: 8.0,
            height_scale: 0.09,
            remove: false,
        }
    }
}

impl NoiseLayer {
    fn validate(&self) -> Result<()> {
        if self.octaves < 1 {
            return Err(TerrainError::InvalidParameter { name: "octaves", value: self.octaves as f32 });
        }
        if self.x_scale < 0.0 {
            return Err(TerrainError::InvalidParameter { name: "x_scale", value: self.x_scale });
        }
        if self.y_scale < 0.0 {
            return Err(TerrainError::InvalidParameter { name: "y_scale", value: self.y_scale });
        }
        if self.persistence <= 0.0 {
            return Err(TerrainError::InvalidParameter { name: "persistence", value: self.persistence });
        }
        Ok(())
    }
}

/// Ordered, never-empty sequence of noise layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStack {
    layers: Vec<NoiseLayer>,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self { layers: vec![NoiseLayer::default()] }
    }
}

impl LayerStack {
    pub fn push(&mut self, layer: NoiseLayer) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoiseLayer> {
        self.layers.iter()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut NoiseLayer> {
        self.layers.get_mut(index)
    }

    /// Drop every layer whose `remove` flag is set. If that would empty the
    /// stack, a single default layer is reinstated instead.
    pub fn remove_flagged(&mut self) {
        self.layers.retain(|l| !l.remove);
        if self.layers.is_empty() {
            self.layers.push(NoiseLayer::default());
        }
    }
}

/// Add one fBM layer into the grid:
/// `h[x,y] += fbm((x+ox)·xs, (y+oy)·ys, octaves, persistence) · height_scale`.
pub fn synthesize(grid: &mut Grid, layer: &NoiseLayer, base: &BaseNoise) -> Result<()> {
    layer.validate()?;
    let r = grid.resolution;
    for y in 0..r {
        for x in 0..r {
            let nx = (x as f32 + layer.offset_x as f32) * layer.x_scale;
            let ny = (y as f32 + layer.offset_y as f32) * layer.y_scale;
            let h = grid.get(x, y) + base.fbm(nx, ny, layer.octaves, layer.persistence) * layer.height_scale;
            grid.set(x, y, h);
        }
    }
    Ok(())
}

/// Sum every layer of the stack into the grid, in stack order.
/// Validates all layers up front so a bad layer leaves the grid untouched.
pub fn synthesize_stack(grid: &mut Grid, stack: &LayerStack, base: &BaseNoise) -> Result<()> {
    for layer in stack.iter() {
        layer.validate()?;
    }
    for layer in stack.iter() {
        synthesize(grid, layer, base)?;
    }
    Ok(())
}

/// Ridged remap: fold every height about 0.5 via `h = 1 − |h − 0.5|`.
/// A post-process over already-synthesized terrain, not a noise function.
pub fn ridge(grid: &mut Grid) {
    for h in &mut grid.data {
        *h = 1.0 - (*h - 0.5).abs();
    }
}

/// Add an independent uniform draw from `[lo, hi)` to every cell.
pub fn random_uplift(grid: &mut Grid, lo: f32, hi: f32, rng: &mut RandomSource) -> Result<()> {
    if lo > hi {
        return Err(TerrainError::InvalidParameter { name: "uplift_range", value: hi - lo });
    }
    let r = grid.resolution;
    for x in 0..r {
        for y in 0..r {
            let h = grid.get(x, y) + rng.uniform(lo, hi);
            grid.set(x, y, h);
        }
    }
    Ok(())
}
