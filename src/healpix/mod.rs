//! # HEALPix Index
//!
//! Hierarchical Equal Area isoLatitude Pixelization of the sphere.
//!
//! The sphere is split into 12 base faces, each subdivided into an
//! `nside x nside` grid, for `npix = 12 * nside^2` pixels of equal area.
//! Two numbering schemes cover the same pixels:
//!
//! - **NESTED**: face number in the high bits, Morton (bit-interleaved)
//!   position inside the face in the low bits. Each pixel is the union of
//!   the 4 consecutively numbered pixels at the next finer order.
//! - **RING**: iso-latitude rings swept from the north pole to the south
//!   pole, west to east within each ring.
//!
//! Face coordinates `(ix, iy, face_num)` are the pivot between the two.
//!
//! A [`HealpixIndex`] is bound to one `nside` at construction and is
//! immutable afterwards, so it can be shared freely between threads.
//!
//! ```rust
//! use healpix_index::HealpixIndex;
//!
//! let index = HealpixIndex::new(4).unwrap();
//! assert_eq!(index.npix(), 192);
//!
//! let ipix = index.ang2pix_nest(std::f64::consts::FRAC_PI_2, 0.0).unwrap();
//! assert_eq!(index.ring2nest(index.nest2ring(ipix).unwrap()).unwrap(), ipix);
//! ```

pub mod boundaries;
pub mod cache;
pub mod nested;
pub mod query;
pub mod range_set;
pub mod ring;
pub mod tables;

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ARCSEC_PER_DEG, N_FACES, NSIDE_LIST, NSIDE_MAX, ORDER_MAX, RAD2DEG};
use crate::coordinates::angle::{cast_to_int, log2};
use crate::coordinates::SpatialVector;
use crate::errors::{HealpixError, Result};

pub use cache::CornerCache;
pub use range_set::LongRangeSetBuilder;

/// Pixel numbering scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Face number plus Morton code within the face
    Nested,
    /// Iso-latitude rings from north to south
    Ring,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Nested => write!(f, "NESTED"),
            Scheme::Ring => write!(f, "RING"),
        }
    }
}

/// Position of a pixel inside one of the 12 base faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceCoord {
    /// Column in `[0, nside)`
    pub ix: i64,
    /// Row in `[0, nside)`
    pub iy: i64,
    /// Base face in `[0, 11]`
    pub face_num: i64,
}

impl FaceCoord {
    /// Creates a face coordinate; validated when handed to an index
    pub fn new(ix: i64, iy: i64, face_num: i64) -> Self {
        FaceCoord { ix, iy, face_num }
    }
}

/// Pixelization engine bound to a single resolution
///
/// All fields are derived from `nside` once in [`HealpixIndex::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealpixIndex {
    nside: i64,
    order: u32,
    nl2: i64,
    nl3: i64,
    nl4: i64,
    npface: i64,
    ncap: i64,
    npix: i64,
    fact1: f64,
    fact2: f64,
}

impl HealpixIndex {
    /// Creates an index for the given resolution
    ///
    /// # Errors
    ///
    /// [`HealpixError::InvalidNside`] unless `nside` is a power of two in
    /// `[1, NSIDE_MAX]`.
    pub fn new(nside: i64) -> Result<Self> {
        if nside <= 0 || nside > NSIDE_MAX {
            return Err(HealpixError::InvalidNside(nside));
        }
        let order = Self::nside2order(nside);
        if order < 0 {
            return Err(HealpixError::InvalidNside(nside));
        }

        let npface = nside * nside;
        let npix = 12 * npface;
        let fact2 = 4.0 / npix as f64;
        let index = HealpixIndex {
            nside,
            order: order as u32,
            nl2: 2 * nside,
            nl3: 3 * nside,
            nl4: 4 * nside,
            npface,
            ncap: 2 * nside * (nside - 1),
            npix,
            fact1: (nside << 1) as f64 * fact2,
            fact2,
        };
        log::debug!(
            "initialized HEALPix index nside={} order={} npix={}",
            nside,
            index.order,
            npix
        );
        Ok(index)
    }

    /// Creates an index for `nside = 2^order`
    pub fn from_order(order: u32) -> Result<Self> {
        Self::new(Self::order2nside(order)?)
    }

    /// Resolution parameter
    pub fn nside(&self) -> i64 {
        self.nside
    }

    /// log2(nside)
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Total number of pixels, `12 * nside^2`
    pub fn npix(&self) -> i64 {
        self.npix
    }

    /// Number of pixels in one polar cap, `2 * nside * (nside - 1)`
    pub fn ncap(&self) -> i64 {
        self.ncap
    }

    /// Number of pixels in one base face, `nside^2`
    pub fn npface(&self) -> i64 {
        self.npface
    }

    /// Number of iso-latitude rings, `4 * nside - 1`
    pub fn nrings(&self) -> i64 {
        self.nl4 - 1
    }

    /// Order of a resolution, or -1 if `nside` is not a power of two
    pub fn nside2order(nside: i64) -> i32 {
        if nside <= 0 || (nside & (nside - 1)) > 0 {
            return -1;
        }
        cast_to_int(log2(nside as f64)) as i32
    }

    /// Resolution for an order
    pub fn order2nside(order: u32) -> Result<i64> {
        if order > ORDER_MAX {
            return Err(HealpixError::InvalidOrder(order));
        }
        Ok(1i64 << order)
    }

    /// Number of pixels at a resolution
    pub fn nside2npix(nside: i64) -> Result<i64> {
        if nside <= 0 || (nside & -nside) != nside || nside > NSIDE_MAX {
            return Err(HealpixError::InvalidNside(nside));
        }
        Ok(12 * nside * nside)
    }

    /// Pixel area in steradians at a resolution
    pub fn nside2pixarea(nside: i64) -> f64 {
        PI / (3.0 * (nside * nside) as f64)
    }

    /// Approximate pixel size in radians (square root of the pixel area)
    pub fn nside2resol(nside: i64) -> f64 {
        (PI / 3.0).sqrt() / nside as f64
    }

    /// Smallest supported resolution whose pixels are no larger than `pixsize` arcseconds
    ///
    /// Requests finer than `NSIDE_MAX` are clamped to it.
    pub fn calculate_nside(pixsize: f64) -> Result<i64> {
        if !(pixsize > 0.0 && pixsize.is_finite()) {
            return Err(HealpixError::InvalidPixelSize(pixsize));
        }
        let pixel_area = pixsize * pixsize;
        let sky_area = 4.0 * PI * RAD2DEG * RAD2DEG * ARCSEC_PER_DEG * ARCSEC_PER_DEG;
        let npixels = cast_to_int(sky_area / pixel_area);
        let nside_req = (npixels as f64 / 12.0).sqrt();

        match NSIDE_LIST.iter().find(|&&nside| nside as f64 >= nside_req) {
            Some(&nside) => Ok(nside),
            None => {
                log::warn!(
                    "nside {:.1} required for {}\" pixels exceeds {}, clamping",
                    nside_req,
                    pixsize,
                    NSIDE_MAX
                );
                Ok(NSIDE_MAX)
            }
        }
    }

    /// Largest angular distance in radians between a pixel centre and its corners
    pub fn max_pixrad(&self) -> f64 {
        let nside = self.nside as f64;
        let va = SpatialVector::from_polar((2.0f64 / 3.0).acos(), PI / (4.0 * nside));
        let t1 = (1.0 - 1.0 / nside).powi(2);
        let vb = SpatialVector::from_polar((1.0 - t1 / 3.0).acos(), 0.0);
        va.angle(&vb)
    }

    /// Unit vector for colatitude `theta` and longitude `phi`
    pub fn vector(theta: f64, phi: f64) -> SpatialVector {
        SpatialVector::from_polar(theta, phi)
    }

    fn check_pixel(&self, ipix: i64) -> Result<()> {
        if ipix < 0 || ipix >= self.npix {
            return Err(HealpixError::PixelOutOfRange {
                ipix,
                npix: self.npix,
            });
        }
        Ok(())
    }

    fn check_face_coord(&self, coord: FaceCoord) -> Result<()> {
        let in_face = |v: i64| (0..self.nside).contains(&v);
        if !in_face(coord.ix) || !in_face(coord.iy) || !(0..N_FACES).contains(&coord.face_num) {
            return Err(HealpixError::InvalidFaceCoordinates {
                ix: coord.ix,
                iy: coord.iy,
                face_num: coord.face_num,
                nside: self.nside,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0, 12, 0)]
    #[case(2, 1, 48, 4)]
    #[case(4, 2, 192, 24)]
    #[case(8, 3, 768, 112)]
    #[case(16384, 14, 3_221_225_472, 536_838_144)]
    fn test_derived_constants(
        #[case] nside: i64,
        #[case] order: u32,
        #[case] npix: i64,
        #[case] ncap: i64,
    ) {
        let index = HealpixIndex::new(nside).unwrap();
        assert_eq!(index.nside(), nside);
        assert_eq!(index.order(), order);
        assert_eq!(index.npix(), npix);
        assert_eq!(index.ncap(), ncap);
        assert_eq!(index.npface(), nside * nside);
        assert_eq!(index.nrings(), 4 * nside - 1);
        assert_abs_diff_eq!(index.fact2, 4.0 / npix as f64);
        assert_abs_diff_eq!(index.fact1, 2.0 / (3.0 * nside as f64), epsilon = 1e-15);
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    #[case(3)]
    #[case(6)]
    #[case(12)]
    #[case(32768)]
    fn test_invalid_nside_rejected(#[case] nside: i64) {
        assert_eq!(
            HealpixIndex::new(nside),
            Err(HealpixError::InvalidNside(nside))
        );
    }

    #[test]
    fn test_order_helpers() {
        assert_eq!(HealpixIndex::nside2order(1), 0);
        assert_eq!(HealpixIndex::nside2order(1024), 10);
        assert_eq!(HealpixIndex::nside2order(3), -1);
        assert_eq!(HealpixIndex::nside2order(0), -1);
        assert_eq!(HealpixIndex::order2nside(5), Ok(32));
        assert_eq!(
            HealpixIndex::order2nside(15),
            Err(HealpixError::InvalidOrder(15))
        );
        assert_eq!(HealpixIndex::from_order(3).unwrap().nside(), 8);
    }

    #[test]
    fn test_nside2npix() {
        assert_eq!(HealpixIndex::nside2npix(1), Ok(12));
        assert_eq!(HealpixIndex::nside2npix(8), Ok(768));
        assert!(HealpixIndex::nside2npix(5).is_err());
        assert!(HealpixIndex::nside2npix(0).is_err());
        assert!(HealpixIndex::nside2npix(32768).is_err());
    }

    #[test]
    fn test_pixel_area_and_resolution() {
        let total: f64 = HealpixIndex::nside2pixarea(16) * HealpixIndex::nside2npix(16).unwrap() as f64;
        assert_abs_diff_eq!(total, 4.0 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(
            HealpixIndex::nside2resol(16).powi(2),
            HealpixIndex::nside2pixarea(16),
            epsilon = 1e-15
        );
    }

    #[rstest]
    #[case(3600.0 * 60.0, 1)]
    #[case(3600.0, 64)]
    #[case(60.0, 4096)]
    #[case(10.0, 16384)]
    #[case(0.001, 16384)]
    fn test_calculate_nside(#[case] pixsize: f64, #[case] expected: i64) {
        assert_eq!(HealpixIndex::calculate_nside(pixsize), Ok(expected));
    }

    #[test]
    fn test_calculate_nside_rejects_bad_sizes() {
        assert!(HealpixIndex::calculate_nside(0.0).is_err());
        assert!(HealpixIndex::calculate_nside(-1.0).is_err());
        assert!(HealpixIndex::calculate_nside(f64::NAN).is_err());
    }

    #[test]
    fn test_max_pixrad_scales_with_resolution() {
        let coarse = HealpixIndex::new(4).unwrap().max_pixrad();
        let fine = HealpixIndex::new(8).unwrap().max_pixrad();
        assert!(coarse > fine);
        // Larger than half the nominal pixel size, smaller than the full size
        let resol = HealpixIndex::nside2resol(8);
        assert!(fine > 0.5 * resol && fine < 1.5 * resol);
    }

    #[test]
    fn test_scheme_serialization() {
        assert_eq!(serde_json::to_string(&Scheme::Nested).unwrap(), r#""nested""#);
        let scheme: Scheme = serde_json::from_str(r#""ring""#).unwrap();
        assert_eq!(scheme, Scheme::Ring);
        assert_eq!(Scheme::Ring.to_string(), "RING");
    }
}
