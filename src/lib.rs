//! healpix-index: HEALPix sky pixelization engine
//!
//! This crate maps positions on the celestial sphere to HEALPix pixel ids and
//! back, in both the NESTED and RING numbering schemes, computes pixel
//! outlines and answers disc (cone) queries.
//!
//! ```rust
//! use healpix_index::{HealpixIndex, SpatialVector};
//!
//! let index = HealpixIndex::new(16).unwrap();
//! let center = SpatialVector::from_radec(83.6, 22.0);
//! let pixels = index.query_disc(&center, 0.1, true, true).unwrap();
//! assert!(pixels.contains(&index.vec2pix_nest(&center).unwrap()));
//! ```

pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod healpix;

// Re-export commonly used types
pub use coordinates::{Polar, RaDec, SpatialVector};
pub use errors::{HealpixError, Result};
pub use healpix::{CornerCache, FaceCoord, HealpixIndex, LongRangeSetBuilder, Scheme};
