//! Procedural heightfield synthesis and erosion.
//!
//! The crate operates on a square [`Grid`] of heights in [0, 1]. Generators
//! (fractal noise layers, Voronoi peak tessellation, midpoint displacement)
//! accumulate into the grid; erosion models mutate it afterwards. Every
//! algorithm draws randomness from an explicit, caller-seeded
//! [`RandomSource`], so a fixed seed reproduces a terrain exactly.

pub mod displace;
pub mod erosion;
pub mod error;
pub mod grid;
pub mod noise;
pub mod rng;
pub mod smooth;

pub use displace::{midpoint_displacement, DisplacementParams};
pub use erosion::{erode, ErosionKind, ErosionParams};
pub use error::TerrainError;
pub use grid::Grid;
pub use noise::fbm::BaseNoise;
pub use noise::layers::{random_uplift, ridge, synthesize, synthesize_stack, LayerStack, NoiseLayer};
pub use noise::voronoi::{tessellate, VoronoiParams, VoronoiVariant};
pub use rng::RandomSource;
pub use smooth::smooth;
