//! RING scheme and NESTED ↔ RING conversion
//!
//! Rings are numbered 1 to `4*nside - 1` from the north pole. The first and
//! last `nside - 1` rings belong to the polar caps and hold `4*i` pixels
//! (`i` counted from the nearer pole); the `2*nside + 1` rings in between
//! form the equatorial belt and hold `4*nside` pixels each.

use std::f64::consts::PI;

use crate::coordinates::angle::{cast_to_int, Polar};
use crate::coordinates::SpatialVector;
use crate::errors::Result;

use super::tables::{JPLL, JRLL};
use super::{FaceCoord, HealpixIndex};

impl HealpixIndex {
    /// RING pixel of a face coordinate
    pub fn xyf2ring(&self, coord: FaceCoord) -> Result<i64> {
        self.check_face_coord(coord)?;
        let FaceCoord { ix, iy, face_num } = coord;
        let face = face_num as usize;

        let jr = JRLL[face] * self.nside - ix - iy - 1;

        let (nr, n_before, kshift);
        if jr < self.nside {
            nr = jr;
            n_before = 2 * nr * (nr - 1);
            kshift = 0;
        } else if jr > self.nl3 {
            nr = self.nl4 - jr;
            n_before = self.npix - 2 * (nr + 1) * nr;
            kshift = 0;
        } else {
            nr = self.nside;
            n_before = self.ncap + (jr - self.nside) * self.nl4;
            kshift = (jr - self.nside) & 1;
        }

        let mut jp = (JPLL[face] * nr + ix - iy + 1 + kshift) / 2;
        if jp > self.nl4 {
            jp -= self.nl4;
        } else if jp < 1 {
            jp += self.nl4;
        }

        Ok(n_before + jp - 1)
    }

    /// Face coordinate of a RING pixel
    pub fn ring2xyf(&self, pix: i64) -> Result<FaceCoord> {
        self.check_pixel(pix)?;

        let (iring, iphi, kshift, nr, face_num);
        if pix < self.ncap {
            // North polar cap
            let ring = cast_to_int(0.5 * (1.0 + ((1 + 2 * pix) as f64).sqrt()));
            iring = ring;
            iphi = (pix + 1) - 2 * ring * (ring - 1);
            kshift = 0;
            nr = ring;
            face_num = Self::cap_face(iphi - 1, ring, 0);
        } else if pix < self.npix - self.ncap {
            // Equatorial belt
            let ip = pix - self.ncap;
            iring = (ip >> (self.order + 2)) + self.nside;
            iphi = (ip & (self.nl4 - 1)) + 1;
            kshift = (iring + self.nside) & 1;
            nr = self.nside;

            let ire = iring - self.nside + 1;
            let irm = self.nl2 + 2 - ire;
            let ifm = (iphi - ire / 2 + self.nside - 1) >> self.order;
            let ifp = (iphi - irm / 2 + self.nside - 1) >> self.order;
            face_num = if ifp == ifm {
                if ifp == 4 {
                    4
                } else {
                    ifp + 4
                }
            } else if ifp < ifm {
                ifp
            } else {
                ifm + 8
            };
        } else {
            // South polar cap, counted from the south pole
            let ip = self.npix - pix;
            let ring = cast_to_int(0.5 * (1.0 + ((2 * ip - 1) as f64).sqrt()));
            iphi = 4 * ring + 1 - (ip - 2 * ring * (ring - 1));
            kshift = 0;
            nr = ring;
            iring = 2 * self.nl2 - ring;
            face_num = Self::cap_face(iphi - 1, ring, 8);
        }

        let face = face_num as usize;
        let irt = iring - JRLL[face] * self.nside + 1;
        let mut ipt = 2 * iphi - JPLL[face] * nr - kshift - 1;
        if ipt >= self.nl2 {
            ipt -= 8 * self.nside;
        }

        Ok(FaceCoord::new((ipt - irt) >> 1, (-(ipt + irt)) >> 1, face_num))
    }

    /// Face of a polar-cap pixel from its 0-based position in a ring of `4*nr` pixels
    fn cap_face(position: i64, nr: i64, first_face: i64) -> i64 {
        let mut face = first_face;
        let mut tmp = position;
        if tmp >= 2 * nr {
            face += 2;
            tmp -= 2 * nr;
        }
        if tmp >= nr {
            face += 1;
        }
        face
    }

    /// Converts a NESTED pixel to the RING scheme
    pub fn nest2ring(&self, ipnest: i64) -> Result<i64> {
        let xyf = self.nest2xyf(ipnest)?;
        self.xyf2ring(xyf)
    }

    /// Converts a RING pixel to the NESTED scheme
    pub fn ring2nest(&self, ipring: i64) -> Result<i64> {
        let xyf = self.ring2xyf(ipring)?;
        self.xyf2nest(xyf)
    }

    /// RING pixel containing the point at colatitude `theta` and longitude `phi`
    pub fn ang2pix_ring(&self, theta: f64, phi: f64) -> Result<i64> {
        let ipnest = self.ang2pix_nest(theta, phi)?;
        self.nest2ring(ipnest)
    }

    /// RING pixel containing the direction of `v`
    pub fn vec2pix_ring(&self, v: &SpatialVector) -> Result<i64> {
        let ipnest = self.vec2pix_nest(v)?;
        self.nest2ring(ipnest)
    }

    /// Centre of a RING pixel
    pub fn pix2ang_ring(&self, ipix: i64) -> Result<Polar> {
        self.check_pixel(ipix)?;

        let ipix1 = ipix + 1; // in {1, npix}
        let (theta, phi);
        if ipix1 <= self.ncap {
            // North polar cap
            let hip = ipix1 as f64 / 2.0;
            let fihip = hip.trunc();
            let iring = cast_to_int((hip - fihip.sqrt()).sqrt()) + 1;
            let iphi = ipix1 - 2 * iring * (iring - 1);

            theta = (1.0 - (iring * iring) as f64 * self.fact2).acos();
            phi = (iphi as f64 - 0.5) * PI / (2.0 * iring as f64);
        } else if ipix < self.npix - self.ncap {
            // Equatorial belt
            let ip = ipix - self.ncap;
            let iring = ip / self.nl4 + self.nside;
            let iphi = ip % self.nl4 + 1;

            // 1 if iring + nside is odd, 1/2 otherwise
            let fodd = if (iring + self.nside) & 1 > 0 { 1.0 } else { 0.5 };
            theta = ((self.nl2 - iring) as f64 * self.fact1).acos();
            phi = (iphi as f64 - fodd) * PI / self.nl2 as f64;
        } else {
            // South polar cap
            let ip = self.npix - ipix;
            let iring = cast_to_int(0.5 * (1.0 + ((2 * ip - 1) as f64).sqrt()));
            let iphi = 4 * iring + 1 - (ip - 2 * iring * (iring - 1));

            theta = (-1.0 + (iring * iring) as f64 * self.fact2).acos();
            phi = (iphi as f64 - 0.5) * PI / (2.0 * iring as f64);
        }

        Ok(Polar::new(theta, phi))
    }

    /// Unit vector towards the centre of a RING pixel
    pub fn pix2vec_ring(&self, ipix: i64) -> Result<SpatialVector> {
        let polar = self.pix2ang_ring(ipix)?;
        Ok(Self::vector(polar.theta, polar.phi))
    }

    /// Ring number, in `[1, 4*nside - 1]`, of a RING pixel
    pub fn ring(&self, ipix: i64) -> Result<i64> {
        self.check_pixel(ipix)?;

        let ipix1 = ipix + 1;
        let iring = if ipix1 <= self.ncap {
            let hip = ipix1 as f64 / 2.0;
            let fihip = hip.trunc();
            cast_to_int((hip - fihip.sqrt()).sqrt()) + 1
        } else if ipix1 <= self.nl2 * (5 * self.nside + 1) {
            let ip = ipix1 - self.ncap - 1;
            ip / self.nl4 + self.nside
        } else {
            // Counted from the south pole first
            let ip = self.npix - ipix1 + 1;
            let hip = ip as f64 / 2.0;
            let fihip = hip.trunc();
            let from_south = cast_to_int((hip - fihip.sqrt()).sqrt()) + 1;
            self.nl4 - from_south
        };
        Ok(iring)
    }
}
