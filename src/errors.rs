//! Error types for the HEALPix index
//!
//! Every failure in this crate is a precondition violation of a pure
//! function: a bad resolution, an angle or pixel outside its domain, or a
//! vector with no direction. Nothing is transient and nothing is retried.

use thiserror::Error;

/// Main error type for HEALPix operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HealpixError {
    /// The resolution parameter is not a positive power of two, or is too large
    #[error("nside must be a power of 2 in [1, {max}], got {0}", max = crate::constants::NSIDE_MAX)]
    InvalidNside(i64),

    /// The resolution order is larger than the maximum supported order
    #[error("order must be in [0, {max}], got {0}", max = crate::constants::ORDER_MAX)]
    InvalidOrder(u32),

    /// A pixel index outside `[0, npix)` was supplied
    #[error("pixel index {ipix} out of range [0, {npix})")]
    PixelOutOfRange {
        /// The offending pixel index
        ipix: i64,
        /// Number of pixels at the index resolution
        npix: i64,
    },

    /// A ring number outside `[1, 4*nside - 1]`
    #[error("ring {ring} out of range [1, {nrings}]")]
    RingOutOfRange {
        /// The offending ring number
        ring: i64,
        /// Number of rings at the index resolution
        nrings: i64,
    },

    /// A face coordinate outside the `nside x nside` grid of one of the 12 base faces
    #[error("face coordinate (ix={ix}, iy={iy}, face={face_num}) invalid for nside {nside}")]
    InvalidFaceCoordinates {
        /// Column within the face
        ix: i64,
        /// Row within the face
        iy: i64,
        /// Base face number
        face_num: i64,
        /// Resolution of the index
        nside: i64,
    },

    /// Colatitude outside `[0, π]`
    #[error("theta must be between 0 and π, got {0}")]
    InvalidTheta(f64),

    /// Longitude outside `[0, 2π]` after a single wrap
    #[error("phi must be between 0 and 2π, got {0}")]
    InvalidPhi(f64),

    /// Disc radius outside `[0, π]`
    #[error("angular radius is in radians and must be in [0, π], got {0}")]
    InvalidRadius(f64),

    /// Boundary sampling step of zero
    #[error("boundary step must be at least 1, got {0}")]
    InvalidStep(usize),

    /// Pixel size that cannot be turned into a resolution
    #[error("pixel size must be a positive number of arcseconds, got {0}")]
    InvalidPixelSize(f64),

    /// A zero-length vector was given where a direction is required
    #[error("zero-length vector has no direction")]
    DegenerateVector,
}

/// Extension of the Result type for HEALPix operations
pub type Result<T> = std::result::Result<T, HealpixError>;
