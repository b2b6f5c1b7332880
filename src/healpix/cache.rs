//! Corner cache for repeated outline lookups
//!
//! Rendering code asks for the four corners of many pixels, mostly at one
//! resolution. The corners of every pixel at that resolution are computed up
//! front; any other resolution goes through a single index that is rebuilt
//! only when the requested `nside` changes.

use crate::coordinates::SpatialVector;
use crate::errors::{HealpixError, Result};

use super::HealpixIndex;

/// Resolution precomputed by [`CornerCache::new`]
pub const DEFAULT_CACHED_NSIDE: i64 = 8;

/// Highest resolution [`CornerCache::with_precomputed`] will tabulate
pub const MAX_CACHED_NSIDE: i64 = 128;

/// Corners of NESTED pixels, precomputed for one resolution
#[derive(Debug, Clone)]
pub struct CornerCache {
    cached: HealpixIndex,
    corners: Vec<Vec<SpatialVector>>,
    last: HealpixIndex,
}

impl CornerCache {
    /// Precomputes the corners of every pixel at nside 8
    pub fn new() -> Result<Self> {
        Self::with_precomputed(DEFAULT_CACHED_NSIDE)
    }

    /// Precomputes the corners of every pixel at `nside`
    ///
    /// Resolutions above [`MAX_CACHED_NSIDE`] are rejected with
    /// [`HealpixError::InvalidNside`].
    pub fn with_precomputed(nside: i64) -> Result<Self> {
        let cached = HealpixIndex::new(nside)?;
        if nside > MAX_CACHED_NSIDE {
            return Err(HealpixError::InvalidNside(nside));
        }
        let corners = (0..cached.npix())
            .map(|ipix| cached.corners_nest(ipix, 1))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("cached corners of {} pixels at nside {}", corners.len(), nside);
        Ok(CornerCache {
            cached,
            corners,
            last: cached,
        })
    }

    /// Resolution answered from the precomputed table
    pub fn precomputed_nside(&self) -> i64 {
        self.cached.nside()
    }

    /// The four corners (north, west, south, east) of NESTED pixel `ipix` at `nside`
    pub fn corners_nest(&mut self, ipix: i64, nside: i64) -> Result<Vec<SpatialVector>> {
        if nside == self.cached.nside() {
            self.cached.check_pixel(ipix)?;
            return Ok(self.corners[ipix as usize].clone());
        }
        if nside != self.last.nside() {
            self.last = HealpixIndex::new(nside)?;
        }
        self.last.corners_nest(ipix, 1)
    }
}
