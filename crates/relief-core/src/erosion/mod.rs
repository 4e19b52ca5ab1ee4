//! Erosion engine: six one-shot models dispatched on [`ErosionKind`].
//!
//! Every model is a pure transformation of (grid, params, rng) → mutated
//! grid; none keeps state between calls. Parameters are validated before
//! any mutation, so a rejected call leaves the grid unchanged.

mod canyon;
mod rain;
mod river;
mod thermal;
mod tidal;
mod wind;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::Grid;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErosionKind {
    Rain,
    Thermal,
    Tidal,
    River,
    Wind,
    Canyon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErosionParams {
    pub kind: ErosionKind,
    /// Model-specific intensity: rain/river droplet strength, thermal talus
    /// threshold, wind jitter scale.
    pub strength: f32,
    /// Thermal transfer fraction per neighbour.
    pub amount: f32,
    /// Droplet count for rain and river.
    pub droplets: u32,
    /// Independent random-walk traversals per river droplet.
    pub springs_per_river: u32,
    /// Per-step sediment decay of a river traversal. Must be positive for
    /// river erosion (a zero-solubility walk would never terminate).
    pub solubility: f32,
    /// Sea level for tidal flattening, in grid height units.
    pub water_height: f32,
}

impl Default for ErosionParams {
    fn default() -> Self {
        Self {
            kind: ErosionKind::Rain,
            strength: 0.1,
            amount: 0.01,
            droplets: 10,
            springs_per_river: 5,
            solubility: 0.01,
            water_height: 0.1,
        }
    }
}

impl ErosionParams {
    fn validate(&self) -> Result<()> {
        if self.strength < 0.0 {
            return Err(TerrainError::InvalidParameter { name: "strength", value: self.strength });
        }
        if self.amount < 0.0 {
            return Err(TerrainError::InvalidParameter { name: "amount", value: self.amount });
        }
        if self.solubility < 0.0 {
            return Err(TerrainError::InvalidParameter { name: "solubility", value: self.solubility });
        }
        if self.kind == ErosionKind::River && self.solubility == 0.0 {
            return Err(TerrainError::InvalidParameter { name: "solubility", value: 0.0 });
        }
        Ok(())
    }
}

/// Apply one erosion pass of the selected model.
pub fn erode(grid: &mut Grid, params: &ErosionParams, rng: &mut RandomSource) -> Result<()> {
    params.validate()?;
    match params.kind {
        ErosionKind::Rain => rain::rain(grid, params, rng),
        ErosionKind::Thermal => thermal::thermal(grid, params),
        ErosionKind::Tidal => tidal::tidal(grid, params),
        ErosionKind::River => river::river(grid, params, rng),
        ErosionKind::Wind => wind::wind(grid, params, rng),
        ErosionKind::Canyon => canyon::canyon(grid, rng),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_strength_is_rejected_without_mutation() {
        let params = ErosionParams { strength: -0.1, ..ErosionParams::default() };
        let mut grid = Grid::filled(5, 0.5);
        let mut rng = RandomSource::from_seed(1);
        let err = erode(&mut grid, &params, &mut rng).unwrap_err();
        assert_eq!(err, TerrainError::InvalidParameter { name: "strength", value: -0.1 });
        assert!(grid.data.iter().all(|&h| h == 0.5));
    }

    #[test]
    fn river_with_zero_solubility_is_rejected() {
        let params = ErosionParams { kind: ErosionKind::River, solubility: 0.0, ..ErosionParams::default() };
        let mut grid = Grid::filled(5, 0.5);
        let mut rng = RandomSource::from_seed(1);
        assert!(erode(&mut grid, &params, &mut rng).is_err());
    }

    #[test]
    fn every_kind_dispatches_and_terminates() {
        for kind in [
            ErosionKind::Rain,
            ErosionKind::Thermal,
            ErosionKind::Tidal,
            ErosionKind::River,
            ErosionKind::Wind,
            ErosionKind::Canyon,
        ] {
            let params = ErosionParams { kind, ..ErosionParams::default() };
            let mut grid = Grid::filled(33, 0.5);
            let mut rng = RandomSource::from_seed(1234);
            erode(&mut grid, &params, &mut rng).unwrap();
            assert!(grid.data.iter().all(|h| h.is_finite()), "{kind:?} produced non-finite heights");
        }
    }
}
