//! Caption text: positioned layers, shaping, and rasterization.

pub mod layers;
pub mod raster;
