//! Sky position representations used at the pixelization boundary

pub mod angle;
pub mod spatial_vector;

pub use angle::{Polar, RaDec};
pub use spatial_vector::SpatialVector;
