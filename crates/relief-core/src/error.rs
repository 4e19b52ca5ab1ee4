//! Error taxonomy for the generation core.
//!
//! Only parameter validation is fallible. Out-of-range coordinates are
//! clamped or skipped by the algorithms themselves, and degenerate
//! configurations (an emptied layer stack) are auto-repaired rather than
//! reported. Every fallible operation validates before touching the grid,
//! so an `Err` always leaves the caller's grid unchanged.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TerrainError {
    /// Midpoint displacement requires a (2^k)+1 resolution.
    #[error("resolution {resolution} is not 2^k + 1")]
    InvalidResolution { resolution: usize },

    /// A parameter is outside its valid domain.
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, TerrainError>;
