//! Height synthesis: fractal Brownian motion layers and Voronoi peak
//! tessellation. Generators accumulate additively into an existing grid,
//! so they compose in any order.
pub mod fbm;
pub mod layers;
pub mod voronoi;
