//! Constants module for pixelization calculations

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Quarter circle
pub const PI_OVER_2: f64 = PI / 2.0;
/// Arcseconds in one degree
pub const ARCSEC_PER_DEG: f64 = 3_600.0;

// Pixelization geometry
/// |cos(theta)| at the boundary between the polar caps and the equatorial belt
pub const TWO_THIRDS: f64 = 2.0 / 3.0;
/// Largest supported resolution; keeps Morton codes inside safe integer width
pub const NSIDE_MAX: i64 = 16_384;
/// log2 of `NSIDE_MAX`
pub const ORDER_MAX: u32 = 14;
/// Number of base faces
pub const N_FACES: i64 = 12;
/// All supported resolutions, coarsest first
pub const NSIDE_LIST: [i64; 15] = [
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384,
];

// Numerical tolerances
/// Threshold below which cos(dec) is treated as a pole when extracting ra
pub const EPS: f64 = 1.0e-7;
/// Longitude jitter allowance when selecting pixels within a ring
pub const RING_PHI_EPSILON: f64 = 1.0e-12;
