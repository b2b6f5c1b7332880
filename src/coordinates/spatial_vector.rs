//! # Spatial Vector Module
//!
//! A 3D Cartesian direction on the celestial sphere, the common currency
//! between angle-based and vector-based pixel queries.
//!
//! ## Coordinate System Convention
//!
//! - **X-axis**: toward ra = 0°, dec = 0°
//! - **Y-axis**: toward ra = 90°, dec = 0°
//! - **Z-axis**: toward the north pole (dec = +90°)
//!
//! ## Unit Length
//!
//! Unit length is not enforced. A vector of any non-zero length may be
//! stored; when its right ascension or declination is requested the
//! direction is normalized first, so the angles are those of the point where
//! the vector pierces the unit sphere. A zero vector has no direction and
//! every angle accessor rejects it with [`HealpixError::DegenerateVector`].
//!
//! ## Cached Angles
//!
//! `ra()` and `dec()` are computed on first use and cached until the
//! components are replaced through [`SpatialVector::set_xyz`]. The cache uses
//! a `Cell`, so a single instance is not `Sync`: callers sharing one vector
//! across threads must serialize access themselves.
//!
//! ```rust
//! use healpix_index::SpatialVector;
//!
//! let v = SpatialVector::new(0.0, 2.0, 0.0);
//! assert!((v.ra().unwrap() - 90.0).abs() < 1e-12);
//! assert!(v.dec().unwrap().abs() < 1e-12);
//! ```

use std::cell::Cell;
use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, EPS, RAD2DEG, TAU};
use crate::coordinates::angle::{Polar, RaDec};
use crate::errors::{HealpixError, Result};

/// A direction in 3D space with lazily cached right ascension and declination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpatialVector {
    x: f64,
    y: f64,
    z: f64,
    #[serde(skip)]
    radec: Cell<Option<RaDec>>,
}

impl SpatialVector {
    /// Creates a vector from its three components
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        SpatialVector {
            x,
            y,
            z,
            radec: Cell::new(None),
        }
    }

    /// Creates the unit vector for right ascension and declination in degrees
    ///
    /// The cache is filled with the given angles.
    pub fn from_radec(ra: f64, dec: f64) -> Self {
        let mut v = SpatialVector::default();
        v.set_radec(ra, dec);
        v
    }

    /// Creates the unit vector for colatitude `theta` and longitude `phi` in radians
    ///
    /// - `x = sin(theta) cos(phi)`
    /// - `y = sin(theta) sin(phi)`
    /// - `z = cos(theta)`
    pub fn from_polar(theta: f64, phi: f64) -> Self {
        let sin_theta = theta.sin();
        SpatialVector::new(sin_theta * phi.cos(), sin_theta * phi.sin(), theta.cos())
    }

    /// X component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Components as an array `[x, y, z]`
    pub fn get(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Replaces the components and invalidates the cached angles
    pub fn set_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.radec.set(None);
    }

    /// Points the vector at right ascension and declination in degrees
    ///
    /// The components become those of the matching unit vector and the
    /// given angles are cached as-is.
    pub fn set_radec(&mut self, ra: f64, dec: f64) {
        let cos_dec = (dec * DEG2RAD).cos();
        self.x = (ra * DEG2RAD).cos() * cos_dec;
        self.y = (ra * DEG2RAD).sin() * cos_dec;
        self.z = (dec * DEG2RAD).sin();
        self.radec.set(Some(RaDec::new(ra, dec)));
    }

    /// Squared Euclidean length
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Scales this vector to unit length in place
    pub fn normalize(&mut self) -> Result<()> {
        let unit = self.normalized()?;
        self.set_xyz(unit.x, unit.y, unit.z);
        Ok(())
    }

    /// Returns the unit vector with the same direction
    pub fn normalized(&self) -> Result<SpatialVector> {
        let d = self.length();
        if d == 0.0 || !d.is_finite() {
            return Err(HealpixError::DegenerateVector);
        }
        Ok(SpatialVector::new(self.x / d, self.y / d, self.z / d))
    }

    /// Dot product
    pub fn dot(&self, other: &SpatialVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    pub fn cross(&self, other: &SpatialVector) -> SpatialVector {
        SpatialVector::from(self.to_vector3().cross(&other.to_vector3()))
    }

    /// Angle in radians between this vector and `other`, in `[0, π]`
    ///
    /// Computed as `atan2(|a × b|, a · b)`: acos of the dot product loses
    /// most of its precision near 0 and π.
    pub fn angle(&self, other: &SpatialVector) -> f64 {
        let a = self.to_vector3();
        let b = other.to_vector3();
        a.cross(&b).norm().atan2(a.dot(&b)).abs()
    }

    /// Declination in degrees
    pub fn dec(&self) -> Result<f64> {
        Ok(self.cached_radec()?.dec)
    }

    /// Right ascension in degrees, in `[0, 360)`
    pub fn ra(&self) -> Result<f64> {
        Ok(self.cached_radec()?.ra)
    }

    /// Right ascension in radians, in `[0, 2π)`
    ///
    /// Zero at the poles where the longitude is undefined.
    pub fn to_ra_radians(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 {
            return 0.0;
        }
        let phi = self.y.atan2(self.x);
        if phi < 0.0 {
            phi + TAU
        } else {
            phi
        }
    }

    /// Declination in radians, in `[-π/2, π/2]`
    pub fn to_dec_radians(&self) -> Result<f64> {
        let d = self.length();
        if d == 0.0 {
            return Err(HealpixError::DegenerateVector);
        }
        Ok(std::f64::consts::FRAC_PI_2 - (self.z / d).clamp(-1.0, 1.0).acos())
    }

    /// Colatitude/longitude of the direction
    pub fn to_polar(&self) -> Result<Polar> {
        let d = self.length();
        if d == 0.0 {
            return Err(HealpixError::DegenerateVector);
        }
        let theta = (self.z / d).clamp(-1.0, 1.0).acos();
        Ok(Polar::new(theta, self.to_ra_radians()))
    }

    /// Converts to a nalgebra Vector3
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    fn cached_radec(&self) -> Result<RaDec> {
        if let Some(radec) = self.radec.get() {
            return Ok(radec);
        }
        let unit = self.normalized()?;
        let dec = unit.z.clamp(-1.0, 1.0).asin() * RAD2DEG;
        let cos_dec = (dec * DEG2RAD).cos();
        let ra = if cos_dec > EPS {
            let mut ra = unit.y.atan2(unit.x) * RAD2DEG;
            if ra < 0.0 {
                ra += 360.0;
            }
            if ra >= 360.0 {
                ra = 0.0;
            }
            ra
        } else {
            0.0
        };
        let radec = RaDec::new(ra, dec);
        self.radec.set(Some(radec));
        Ok(radec)
    }
}

impl PartialEq for SpatialVector {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl From<Vector3<f64>> for SpatialVector {
    fn from(vec: Vector3<f64>) -> Self {
        SpatialVector::new(vec.x, vec.y, vec.z)
    }
}

impl From<&SpatialVector> for Vector3<f64> {
    fn from(v: &SpatialVector) -> Self {
        v.to_vector3()
    }
}

impl fmt::Display for SpatialVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpatialVector[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl std::ops::Add for SpatialVector {
    type Output = SpatialVector;

    fn add(self, other: SpatialVector) -> SpatialVector {
        SpatialVector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for SpatialVector {
    type Output = SpatialVector;

    fn sub(self, other: SpatialVector) -> SpatialVector {
        SpatialVector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for SpatialVector {
    type Output = SpatialVector;

    fn mul(self, scalar: f64) -> SpatialVector {
        SpatialVector::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}
