//! NESTED scheme: angle ↔ pixel and face coordinate ↔ pixel

use crate::constants::{PI_OVER_2, TAU, TWO_THIRDS};
use crate::coordinates::angle::{cast_to_int, Polar, RaDec};
use crate::coordinates::SpatialVector;
use crate::errors::{HealpixError, Result};

use super::tables::{deinterleave, interleave, JPLL, JRLL};
use super::{FaceCoord, HealpixIndex};

impl HealpixIndex {
    /// NESTED pixel containing the point at colatitude `theta` and longitude `phi`
    ///
    /// `phi` is wrapped by one period if it lies in `[-2π, 0)` or `[2π, 4π)`.
    ///
    /// # Errors
    ///
    /// [`HealpixError::InvalidTheta`] if `theta` is outside `[0, π]`,
    /// [`HealpixError::InvalidPhi`] if `phi` is still outside `[0, 2π]` after
    /// the wrap.
    pub fn ang2pix_nest(&self, theta: f64, phi: f64) -> Result<i64> {
        let mut phi = phi;
        if phi >= TAU {
            phi -= TAU;
        }
        if phi < 0.0 {
            phi += TAU;
        }
        if !(0.0..=std::f64::consts::PI).contains(&theta) {
            return Err(HealpixError::InvalidTheta(theta));
        }
        if !(0.0..=TAU).contains(&phi) {
            return Err(HealpixError::InvalidPhi(phi));
        }

        let nside = self.nside;
        let z = theta.cos();
        let za = z.abs();
        let tt = phi / PI_OVER_2; // in [0, 4]

        let (ix, iy, face_num);
        if za <= TWO_THIRDS {
            // Equatorial belt: indices of the edge lines through the point,
            // increasing with longitude
            let temp1 = nside as f64 * (0.5 + tt);
            let temp2 = nside as f64 * (z * 0.75);
            let jp = cast_to_int(temp1 - temp2); // ascending edge line
            let jm = cast_to_int(temp1 + temp2); // descending edge line

            let ifp = jp >> self.order; // in {0, 4}
            let ifm = jm >> self.order;
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

            ix = jm & (nside - 1);
            iy = nside - (jp & (nside - 1)) - 1;
        } else {
            // Polar caps: edge line indices grow with distance from the nearest pole
            let ntt = cast_to_int(tt).min(3);
            let tp = tt - ntt as f64;
            let tmp = nside as f64 * (3.0 * (1.0 - za)).sqrt();

            // Clipped for points numerically on the cap boundary
            let jp = cast_to_int(tp * tmp).min(nside - 1);
            let jm = cast_to_int((1.0 - tp) * tmp).min(nside - 1);

            if z >= 0.0 {
                face_num = ntt;
                ix = nside - jm - 1;
                iy = nside - jp - 1;
            } else {
                face_num = ntt + 8;
                ix = jp;
                iy = jm;
            }
        }

        self.xyf2nest(FaceCoord::new(ix, iy, face_num))
    }

    /// NESTED pixel containing the point at right ascension / declination in degrees
    pub fn radec2pix_nest(&self, ra: f64, dec: f64) -> Result<i64> {
        let polar = RaDec::new(ra, dec).to_polar();
        self.ang2pix_nest(polar.theta, polar.phi)
    }

    /// NESTED pixel containing the direction of `v`
    pub fn vec2pix_nest(&self, v: &SpatialVector) -> Result<i64> {
        let polar = Self::vec2ang(v)?;
        self.ang2pix_nest(polar.theta, polar.phi)
    }

    /// Colatitude/longitude of a pixel direction, `phi` in `[0, 2π)`
    pub fn vec2ang(v: &SpatialVector) -> Result<Polar> {
        v.to_polar()
    }

    /// Centre of a NESTED pixel
    ///
    /// # Errors
    ///
    /// [`HealpixError::PixelOutOfRange`] unless `0 <= ipix < npix`.
    pub fn pix2ang_nest(&self, ipix: i64) -> Result<Polar> {
        self.check_pixel(ipix)?;

        let FaceCoord { ix, iy, face_num } = self.nest2xyf(ipix)?;
        let face = face_num as usize;

        // Ring number in {1, 4*nside - 1}
        let jr = (JRLL[face] << self.order) - ix - iy - 1;

        let (nr, z, kshift);
        if jr < self.nside {
            // North polar cap
            nr = jr;
            z = 1.0 - (nr * nr) as f64 * self.fact2;
            kshift = 0;
        } else if jr > self.nl3 {
            // South polar cap
            nr = self.nl4 - jr;
            z = (nr * nr) as f64 * self.fact2 - 1.0;
            kshift = 0;
        } else {
            // Equatorial belt; odd rings are shifted by half a pixel
            nr = self.nside;
            z = (self.nl2 - jr) as f64 * self.fact1;
            kshift = (jr - self.nside) & 1;
        }
        let theta = z.clamp(-1.0, 1.0).acos();

        // Longitude index in the ring, in {1, 4*nr}
        let mut jp = (JPLL[face] * nr + ix - iy + 1 + kshift) / 2;
        if jp > self.nl4 {
            jp -= self.nl4;
        }
        if jp < 1 {
            jp += self.nl4;
        }

        let phi = (jp as f64 - (kshift + 1) as f64 * 0.5) * (PI_OVER_2 / nr as f64);
        Ok(Polar::new(theta, phi))
    }

    /// Unit vector towards the centre of a NESTED pixel
    pub fn pix2vec_nest(&self, ipix: i64) -> Result<SpatialVector> {
        let polar = self.pix2ang_nest(ipix)?;
        Ok(Self::vector(polar.theta, polar.phi))
    }

    /// NESTED pixel of a face coordinate
    ///
    /// `face_num << 2*order` followed by the Morton code of `(ix, iy)`.
    pub fn xyf2nest(&self, coord: FaceCoord) -> Result<i64> {
        self.check_face_coord(coord)?;
        let morton = interleave(coord.ix as u32, coord.iy as u32);
        Ok((coord.face_num << (2 * self.order)) + morton as i64)
    }

    /// Face coordinate of a NESTED pixel
    pub fn nest2xyf(&self, ipix: i64) -> Result<FaceCoord> {
        self.check_pixel(ipix)?;
        let face_num = ipix >> (2 * self.order);
        let (ix, iy) = deinterleave((ipix & (self.npface - 1)) as u64);
        Ok(FaceCoord::new(ix as i64, iy as i64, face_num))
    }
}
