//! Disc queries
//!
//! A disc (spherical cap) is scanned ring by ring: the latitude band it
//! covers gives a range of rings, and on each ring the half-width in
//! longitude of the chord through the cap selects a run of pixels. Rings
//! entirely inside the cap (around a pole it contains) are taken whole.

use std::f64::consts::PI;

use crate::constants::{RING_PHI_EPSILON, TAU, TWO_THIRDS};
use crate::coordinates::angle::cast_to_int;
use crate::coordinates::{Polar, SpatialVector};
use crate::errors::{HealpixError, Result};

use super::range_set::LongRangeSetBuilder;
use super::{HealpixIndex, Scheme};

impl HealpixIndex {
    /// Pixels whose centres lie within `radius` radians of `center`
    ///
    /// With `inclusive` the radius is widened by `π / (4 * nside)`, which
    /// also picks up most pixels that only overlap the edge of the disc.
    /// Ids are in NESTED order when `nested` is set, RING order otherwise;
    /// either way the result is sorted and free of duplicates.
    ///
    /// # Errors
    ///
    /// [`HealpixError::InvalidRadius`] unless `0 <= radius <= π`,
    /// [`HealpixError::DegenerateVector`] for a zero-length `center`.
    pub fn query_disc(
        &self,
        center: &SpatialVector,
        radius: f64,
        nested: bool,
        inclusive: bool,
    ) -> Result<Vec<i64>> {
        if !(0.0..=PI).contains(&radius) {
            return Err(HealpixError::InvalidRadius(radius));
        }

        // A cap wider than π is the whole sphere
        let radius_eff = if inclusive {
            (radius + PI / self.nl4 as f64).min(PI)
        } else {
            radius
        };

        let Polar { theta, phi } = Self::vec2ang(center)?;
        let z0 = theta.cos();
        // Infinite when the centre is on a pole
        let xa = 1.0 / ((1.0 - z0) * (1.0 + z0)).sqrt();

        // Colatitudes of the northernmost and southernmost points of the disc
        let rlat1 = theta - radius_eff;
        let rlat2 = theta + radius_eff;
        let cosang = radius_eff.cos();

        let irmin = (self.ring_above(rlat1.cos()) + 1).min(self.nl4 - 1);
        let mut irmax = self.ring_above(rlat2.cos());
        if irmax < irmin && irmax == 0 {
            irmax = irmin;
        }
        log::trace!(
            "query_disc theta={:.6} phi={:.6} r={:.6} rings {}..={}",
            theta,
            phi,
            radius_eff,
            irmin,
            irmax
        );

        let mut res = LongRangeSetBuilder::new();

        if rlat1 <= 0.0 {
            // North pole inside the disc
            for ring in 1..irmin {
                self.in_ring(ring, 0.0, PI, &mut res, false)?;
            }
        }

        for iz in irmin..=irmax {
            let z = self.ring_z(iz);

            // Half-width in longitude of the disc on this ring
            let x = (cosang - z * z0) * xa;
            let ysq = 1.0 - z * z - x * x;
            // A negative ysq is decided by the sign of x rather than by
            // falling back to the radius, which overshoots near the poles
            let dphi = if ysq >= 0.0 {
                ysq.sqrt().atan2(x)
            } else if x < 0.0 {
                // Whole ring inside the disc
                PI
            } else if x > 0.0 {
                // Ring misses the disc
                continue;
            } else {
                // Centre on a pole with the ring exactly on the edge
                radius_eff
            };
            self.in_ring(iz, phi, dphi, &mut res, false)?;
        }

        if rlat2 >= PI {
            // South pole inside the disc
            for ring in irmax + 1..self.nl4 {
                self.in_ring(ring, 0.0, PI, &mut res, false)?;
            }
        }

        let pixels = if nested {
            let mut nest = res
                .iter()
                .map(|ipring| self.ring2nest(ipring))
                .collect::<Result<Vec<_>>>()?;
            nest.sort_unstable();
            nest.dedup();
            nest
        } else {
            res.build()
        };
        log::trace!("query_disc selected {} pixels", pixels.len());
        Ok(pixels)
    }

    /// [`HealpixIndex::query_disc`] with the output scheme given as a [`Scheme`]
    pub fn query_disc_scheme(
        &self,
        center: &SpatialVector,
        radius: f64,
        scheme: Scheme,
        inclusive: bool,
    ) -> Result<Vec<i64>> {
        self.query_disc(center, radius, scheme == Scheme::Nested, inclusive)
    }

    /// Adds the RING pixels of ring `iz` with longitudes in `[phi0 - dphi, phi0 + dphi]`
    ///
    /// Strict mode keeps the pixels whose centre lies in the interval.
    /// Conservative mode rounds both ends to the nearest pixel, so pixels
    /// whose extent crosses an end are kept as well. A half-width of `π` or
    /// more takes the whole ring.
    ///
    /// # Errors
    ///
    /// [`HealpixError::RingOutOfRange`] unless `1 <= iz <= 4*nside - 1`.
    pub fn in_ring(
        &self,
        iz: i64,
        phi0: f64,
        dphi: f64,
        res: &mut LongRangeSetBuilder,
        conservative: bool,
    ) -> Result<()> {
        if iz < 1 || iz >= self.nl4 {
            return Err(HealpixError::RingOutOfRange {
                ring: iz,
                nrings: self.nrings(),
            });
        }

        // First pixel, pixel count and centre offset (in pixels) of the ring
        let (ipix1, nr, shift) = if iz >= self.nside && iz <= self.nl3 {
            let ir = iz - self.nside + 1;
            (self.ncap + self.nl4 * (ir - 1), self.nl4, (ir % 2) as f64 / 2.0)
        } else if iz < self.nside {
            (2 * iz * (iz - 1), 4 * iz, 0.5)
        } else {
            let ir = self.nl4 - iz;
            (self.npix - 2 * ir * (ir + 1), 4 * ir, 0.5)
        };
        let ipix2 = ipix1 + nr - 1;

        if dphi >= PI || (dphi - PI).abs() < RING_PHI_EPSILON {
            res.append_range(ipix1, ipix2);
            return Ok(());
        }

        // Unwrapped indices: pixel k of the ring has its centre at (k + shift) * 2π / nr
        let scale = nr as f64 / TAU;
        let (lo, hi) = if conservative {
            (
                cast_to_int(((phi0 - dphi) * scale - shift + 0.5).floor()),
                cast_to_int(((phi0 + dphi) * scale - shift + 0.5).floor()),
            )
        } else {
            (
                cast_to_int(((phi0 - dphi - RING_PHI_EPSILON) * scale - shift).ceil()),
                cast_to_int(((phi0 + dphi + RING_PHI_EPSILON) * scale - shift).floor()),
            )
        };

        if hi < lo {
            return Ok(());
        }
        if hi - lo + 1 >= nr {
            res.append_range(ipix1, ipix2);
            return Ok(());
        }

        let first = lo.rem_euclid(nr);
        let last = hi.rem_euclid(nr);
        if first <= last {
            res.append_range(ipix1 + first, ipix1 + last);
        } else {
            // Interval crosses phi = 0
            res.append_range(ipix1, ipix1 + last);
            res.append_range(ipix1 + first, ipix2);
        }
        Ok(())
    }

    /// Number of the ring immediately north of `z = cos(theta)`, in `[0, 4*nside - 1]`
    ///
    /// Zero means `z` lies north of the first ring.
    pub fn ring_above(&self, z: f64) -> i64 {
        let az = z.abs();
        if az > TWO_THIRDS {
            // Polar caps
            let iring = cast_to_int(self.nside as f64 * (3.0 * (1.0 - az)).sqrt());
            if z > 0.0 {
                iring
            } else {
                self.nl4 - iring - 1
            }
        } else {
            cast_to_int(self.nside as f64 * (2.0 - 1.5 * z))
        }
    }

    /// `cos(theta)` of the centres in ring `iz`
    fn ring_z(&self, iz: i64) -> f64 {
        if iz < self.nside {
            1.0 - (iz * iz) as f64 * self.fact2
        } else if iz <= self.nl3 {
            (self.nl2 - iz) as f64 * self.fact1
        } else {
            let k = self.nl4 - iz;
            -1.0 + (k * k) as f64 * self.fact2
        }
    }
}
