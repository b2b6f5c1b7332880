//! # Angle Helpers
//!
//! Stateless helpers shared by the pixelization code: degree/radian
//! conversion, the two spherical position forms used at the library
//! boundary, and the integer truncation used throughout the HEALPix
//! formulas.
//!
//! ## Position Forms
//!
//! - [`Polar`]: colatitude `theta` in `[0, π]` (0 at the north pole) and
//!   longitude `phi` in `[0, 2π)`, both in radians
//! - [`RaDec`]: right ascension in `[0, 360)` and declination in `[-90, 90]`,
//!   both in degrees
//!
//! The two are related by `dec = 90 - theta * 180/π` and `ra = phi * 180/π`.
//!
//! ```rust
//! use healpix_index::coordinates::angle::{Polar, RaDec};
//!
//! let polar = RaDec::new(90.0, 0.0).to_polar();
//! assert!((polar.theta - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
//! assert!((polar.phi - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::constants::{DEG2RAD, RAD2DEG};

/// Converts degrees to radians
pub fn to_radians(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

/// Converts radians to degrees
pub fn to_degrees(radians: f64) -> f64 {
    radians * RAD2DEG
}

/// Truncates toward zero, the integer conversion every HEALPix formula assumes
///
/// Values outside the `i64` range saturate.
pub fn cast_to_int(value: f64) -> i64 {
    value.trunc() as i64
}

/// Base-2 logarithm
pub fn log2(value: f64) -> f64 {
    value.ln() / std::f64::consts::LN_2
}

/// A position as colatitude/longitude in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polar {
    /// Colatitude in radians, 0 at the north pole
    pub theta: f64,
    /// Longitude in radians, increasing eastward
    pub phi: f64,
}

impl Polar {
    /// Creates a polar position; no range check is applied here
    pub fn new(theta: f64, phi: f64) -> Self {
        Polar { theta, phi }
    }

    /// Converts to right ascension / declination in degrees
    pub fn to_radec(&self) -> RaDec {
        RaDec {
            ra: to_degrees(self.phi),
            dec: to_degrees(PI / 2.0 - self.theta),
        }
    }
}

impl fmt::Display for Polar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "theta: {}, phi: {}", self.theta, self.phi)
    }
}

/// A position as right ascension / declination in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaDec {
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
}

impl RaDec {
    /// Creates an equatorial position; no range check is applied here
    pub fn new(ra: f64, dec: f64) -> Self {
        RaDec { ra, dec }
    }

    /// Converts to colatitude/longitude in radians
    pub fn to_polar(&self) -> Polar {
        Polar {
            theta: PI / 2.0 - to_radians(self.dec),
            phi: to_radians(self.ra),
        }
    }
}

impl fmt::Display for RaDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ra: {}°, dec: {}°", self.ra, self.dec)
    }
}
