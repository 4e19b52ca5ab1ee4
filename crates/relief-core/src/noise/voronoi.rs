//! Voronoi-style peak tessellation.
//!
//! Drops random peaks onto the grid and radiates a falloff surface from
//! each one, keeping the per-cell maximum. Peaks only ever raise terrain:
//! synthesis is monotone non-decreasing per cell.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::Grid;
use crate::noise::fbm::BaseNoise;
use crate::noise::layers::NoiseLayer;
use crate::rng::RandomSource;

/// Falloff formula applied around each peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoronoiVariant {
    Linear,
    Power,
    SinPow,
    Combined,
    /// Linear falloff perturbed by an independent fBM sample.
    PerlinBlend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoronoiParams {
    pub peak_count: usize,
    pub fall_off: f32,
    pub drop_off: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub variant: VoronoiVariant,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            peak_count: 5,
            fall_off: 0.2,
            drop_off: 0.6,
            min_height: 0.1,
            max_height: 0.9,
            variant: VoronoiVariant::Linear,
        }
    }
}

impl VoronoiParams {
    fn validate(&self) -> Result<()> {
        if self.peak_count < 1 {
            return Err(TerrainError::InvalidParameter { name: "peak_count", value: 0.0 });
        }
        if self.fall_off < 0.0 {
            return Err(TerrainError::InvalidParameter { name: "fall_off", value: self.fall_off });
        }
        if self.drop_off < 0.0 {
            return Err(TerrainError::InvalidParameter { name: "drop_off", value: self.drop_off });
        }
        if self.min_height > self.max_height {
            return Err(TerrainError::InvalidParameter { name: "min_height", value: self.min_height });
        }
        Ok(())
    }
}

/// Tessellate `peak_count` random peaks into the grid.
///
/// A peak whose cell already sits at or above the drawn height is skipped
/// entirely (earlier peaks at the same site win). Otherwise the peak cell
/// is written and every other cell is raised to the falloff height where
/// that exceeds the existing terrain. Distance is Euclidean, normalized by
/// the length of the grid diagonal.
///
/// `blend` supplies the fBM parameters for [`VoronoiVariant::PerlinBlend`];
/// it is unused by the other variants.
pub fn tessellate(
    grid: &mut Grid,
    params: &VoronoiParams,
    blend: &NoiseLayer,
    base: &BaseNoise,
    rng: &mut RandomSource,
) -> Result<()> {
    params.validate()?;
    let r = grid.resolution;
    let max_distance = ((r * r + r * r) as f32).sqrt();

    for _ in 0..params.peak_count {
        let px = rng.index(r);
        let py = rng.index(r);
        let peak_height = rng.uniform(params.min_height, params.max_height);

        if grid.get(px, py) >= peak_height {
            continue;
        }
        grid.set(px, py, peak_height);

        for y in 0..r {
            for x in 0..r {
                if x == px && y == py {
                    continue;
                }
                let dx = x as f32 - px as f32;
                let dy = y as f32 - py as f32;
                let dist = (dx * dx + dy * dy).sqrt() / max_distance;
                let h = falloff_height(params, peak_height, dist, x, y, blend, base);
                if grid.get(x, y) < h {
                    grid.set(x, y, h);
                }
            }
        }
    }
    Ok(())
}

fn falloff_height(
    params: &VoronoiParams,
    peak_height: f32,
    dist: f32,
    x: usize,
    y: usize,
    blend: &NoiseLayer,
    base: &BaseNoise,
) -> f32 {
    match params.variant {
        VoronoiVariant::Linear => peak_height - dist * params.fall_off,
        VoronoiVariant::Power => peak_height - dist.powf(params.drop_off) * params.fall_off,
        VoronoiVariant::SinPow => {
            peak_height
                - (dist * 3.0).powf(params.fall_off)
                - (dist * 2.0 * std::f32::consts::PI).sin() / params.drop_off
        }
        VoronoiVariant::Combined => {
            peak_height - dist * params.fall_off - dist.powf(params.drop_off)
        }
        VoronoiVariant::PerlinBlend => {
            let nx = (x as f32 + blend.offset_x as f32) * blend.x_scale;
            let ny = (y as f32 + blend.offset_y as f32) * blend.y_scale;
            peak_height - dist * params.fall_off
                + base.fbm(nx, ny, blend.octaves, blend.persistence) * blend.height_scale
        }
    }
}
