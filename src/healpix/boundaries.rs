//! Pixel boundaries
//!
//! The outline of a pixel is sampled along its western and eastern edges at
//! chosen values of `cos(theta)`. At each latitude the edge longitudes come
//! from inverting the forward projection of the region (north cap,
//! equatorial belt, south cap) that latitude falls in.

use crate::constants::PI_OVER_2;
use crate::coordinates::angle::cast_to_int;
use crate::coordinates::SpatialVector;
use crate::errors::{HealpixError, Result};

use super::HealpixIndex;

impl HealpixIndex {
    /// Limits in `cos(theta)` of ring `i_th` (`i_th >= 1`)
    ///
    /// Returns `(b, ab, a)`: the northern edge, the ring centre and the
    /// southern edge of the pixels in that ring.
    pub fn integration_limits_in_costh(&self, i_th: i64) -> (f64, f64, f64) {
        let r_n_side = self.nside as f64;
        let npface = self.npface as f64;
        let i = i_th as f64;
        let (a, ab, b);

        if i_th <= self.nside {
            ab = 1.0 - (i * i / 3.0) / npface;
            b = 1.0 - ((i - 1.0) * (i - 1.0) / 3.0) / npface;
            a = if i_th == self.nside {
                2.0 * (r_n_side - 1.0) / 3.0 / r_n_side
            } else {
                1.0 - (i + 1.0) * (i + 1.0) / 3.0 / npface
            };
        } else if i_th < self.nl3 {
            let k = (2 * self.nside - i_th) as f64;
            ab = 2.0 * k / 3.0 / r_n_side;
            b = 2.0 * (k + 1.0) / 3.0 / r_n_side;
            a = 2.0 * (k - 1.0) / 3.0 / r_n_side;
        } else {
            let k = (self.nl4 - i_th) as f64;
            b = if i_th == self.nl3 {
                2.0 * (-r_n_side + 1.0) / 3.0 / r_n_side
            } else {
                -1.0 + (k + 1.0) * (k + 1.0) / 3.0 / npface
            };
            a = -1.0 + (k - 1.0) * (k - 1.0) / 3.0 / npface;
            ab = -1.0 + k * k / 3.0 / npface;
        }

        (b, ab, a)
    }

    /// Western and eastern longitudes of a pixel edge at latitude `cos_theta`
    ///
    /// `i_th` is the ring number, `i_phi` the 1-based pixel position inside
    /// quarter `i_zone` (0..=3) of the ring.
    pub fn pixel_boundaries(&self, i_th: i64, i_phi: i64, i_zone: i64, cos_theta: f64) -> (f64, f64) {
        let r_n_side = self.nside as f64;
        let zone = i_zone as f64;

        // Closer to a pole than the centre of the first ring, the edges span the whole quarter
        if cos_theta.abs() > 1.0 - 1.0 / 3.0 / self.npface as f64 {
            return (zone * PI_OVER_2, (zone + 1.0) * PI_OVER_2);
        }

        let (phi_l, phi_r);
        if 1.5 * cos_theta >= 1.0 {
            // North polar cap
            let sq3th = (3.0 * (1.0 - cos_theta)).sqrt();
            let factor = 1.0 / r_n_side / sq3th;
            let jd = i_phi as f64;
            let ju = jd - 1.0;
            let ku = (i_th - i_phi) as f64;
            let kd = ku + 1.0;

            phi_l = PI_OVER_2 * ((ju * factor).max(1.0 - kd * factor) + zone);
            phi_r = PI_OVER_2 * ((1.0 - ku * factor).min(jd * factor) + zone);
        } else if -1.0 < 1.5 * cos_theta {
            // Equatorial belt
            let cth34 = 0.5 * (1.0 - 1.5 * cos_theta);
            let cth34_1 = cth34 + 1.0;
            // Rings whose pixels are shifted by half a pixel have odd i_th + nside
            let modfactor = (self.nside + (i_th + self.nside) % 2) as f64;
            let ring = i_th as f64;

            let jd = i_phi as f64 - (modfactor - ring) / 2.0;
            let ju = jd - 1.0;
            let ku = (modfactor + ring) / 2.0 - i_phi as f64;
            let kd = ku + 1.0;

            phi_l = PI_OVER_2 * ((cth34_1 - kd / r_n_side).max(-cth34 + ju / r_n_side) + zone);
            phi_r = PI_OVER_2 * ((cth34_1 - ku / r_n_side).min(-cth34 + jd / r_n_side) + zone);
        } else {
            // South polar cap
            let sq3th = (3.0 * (1.0 + cos_theta)).sqrt();
            let factor = 1.0 / r_n_side / sq3th;
            let ns2 = 2 * self.nside;

            let jd = (i_th - ns2 + i_phi) as f64;
            let ju = jd - 1.0;
            let ku = (ns2 - i_phi) as f64;
            let kd = ku + 1.0;
            let ns2 = ns2 as f64;

            phi_l = PI_OVER_2 * ((1.0 - (ns2 - ju) * factor).max((ns2 - kd) * factor) + zone);
            phi_r = PI_OVER_2 * ((1.0 - (ns2 - jd) * factor).min((ns2 - ku) * factor) + zone);
        }

        (phi_l, phi_r)
    }

    /// Points along the boundary of a RING pixel
    ///
    /// Returns exactly `4 * step` unit vectors: the north vertex, `2*step - 1`
    /// points down the western edge (the western vertex is point `step`),
    /// the south vertex, then `2*step - 1` points back up the eastern edge.
    /// With `step == 1` these are the four corners north, west, south, east.
    ///
    /// # Errors
    ///
    /// [`HealpixError::InvalidStep`] for `step == 0`,
    /// [`HealpixError::PixelOutOfRange`] for an invalid pixel.
    pub fn corners_ring(&self, pix: i64, step: usize) -> Result<Vec<SpatialVector>> {
        if step == 0 {
            return Err(HealpixError::InvalidStep(step));
        }
        let centre = self.pix2ang_ring(pix)?;
        let phi = centre.phi;

        let i_zone = cast_to_int(phi / PI_OVER_2);
        let ringno = self.ring(pix)?;
        let i_phi_count = ringno.min(self.nside.min(self.nl4 - ringno));
        let phifac = PI_OVER_2 / i_phi_count as f64;
        let mut i_phi = if ringno >= self.nside && ringno <= self.nl3 {
            // Shifted equatorial rings start half a pixel out of phase
            let parity = ((ringno + self.nside) % 2) as f64;
            cast_to_int(phi / phifac + parity / 2.0) + 1
        } else {
            cast_to_int(phi / phifac) + 1
        };
        i_phi -= i_zone * i_phi_count;

        let (north, middle, south) = self.integration_limits_in_costh(ringno);
        let eastern_half = i_phi as f64 > i_phi_count as f64 / 2.0;
        let vertex = |cos_theta: f64| {
            let (phi_l, phi_r) = self.pixel_boundaries(ringno, i_phi, i_zone, cos_theta);
            let phi = if eastern_half { phi_r } else { phi_l };
            Self::vector(cos_theta.acos(), phi)
        };

        // Latitudes strictly between the north and south vertices
        let side_count = 2 * step - 1;
        let side_cos = |p: usize| {
            if p <= step {
                north + (middle - north) * p as f64 / step as f64
            } else {
                middle + (south - middle) * (p - step) as f64 / step as f64
            }
        };

        let mut points = Vec::with_capacity(4 * step);
        points.push(vertex(north));
        for p in 1..=side_count {
            let cos_theta = side_cos(p);
            let (phi_l, _) = self.pixel_boundaries(ringno, i_phi, i_zone, cos_theta);
            points.push(Self::vector(cos_theta.acos(), phi_l));
        }
        points.push(vertex(south));
        for p in (1..=side_count).rev() {
            let cos_theta = side_cos(p);
            let (_, phi_r) = self.pixel_boundaries(ringno, i_phi, i_zone, cos_theta);
            points.push(Self::vector(cos_theta.acos(), phi_r));
        }

        Ok(points)
    }

    /// Points along the boundary of a NESTED pixel, see [`HealpixIndex::corners_ring`]
    pub fn corners_nest(&self, pix: i64, step: usize) -> Result<Vec<SpatialVector>> {
        let pixr = self.nest2ring(pix)?;
        self.corners_ring(pixr, step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::healpix::FaceCoord;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

    fn assert_at(v: &SpatialVector, z: f64, phi: f64) {
        let expected = HealpixIndex::vector(z.acos(), phi);
        assert!(v.angle(&expected) < 1e-12, "{} is not at z={} phi={}", v, z, phi);
    }

    #[test]
    fn test_integration_limits_are_ordered() {
        let index = HealpixIndex::new(8).unwrap();
        for ring in 1..=index.nrings() {
            let (b, ab, a) = index.integration_limits_in_costh(ring);
            assert!(b > ab && ab > a, "ring {}: {} {} {}", ring, b, ab, a);
        }
        assert_eq!(index.integration_limits_in_costh(1).0, 1.0);
        assert_abs_diff_eq!(index.integration_limits_in_costh(31).2, -1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_base_face_corners() {
        let index = HealpixIndex::new(1).unwrap();

        // North face 0: pole, then the two equatorial-belt corners, bottom vertex on the equator
        let corners = index.corners_nest(0, 1).unwrap();
        assert_eq!(corners.len(), 4);
        assert_at(&corners[0], 1.0, 0.0);
        assert_at(&corners[1], 2.0 / 3.0, 0.0);
        assert_at(&corners[2], 0.0, FRAC_PI_4);
        assert_at(&corners[3], 2.0 / 3.0, FRAC_PI_2);

        // Equatorial face 4 straddles phi = 0
        let corners = index.corners_nest(4, 1).unwrap();
        assert_at(&corners[0], 2.0 / 3.0, 0.0);
        assert_at(&corners[1], 0.0, -FRAC_PI_4);
        assert_at(&corners[2], -2.0 / 3.0, 0.0);
        assert_at(&corners[3], 0.0, FRAC_PI_4);
    }

    #[test]
    fn test_equatorial_pixel_corners() {
        let index = HealpixIndex::new(2).unwrap();
        // Northernmost pixel of face 4
        let pix = index.xyf2nest(FaceCoord::new(1, 1, 4)).unwrap();
        let corners = index.corners_nest(pix, 1).unwrap();
        assert_at(&corners[0], 2.0 / 3.0, 0.0);
        assert_at(&corners[1], 1.0 / 3.0, -FRAC_PI_8);
        assert_at(&corners[2], 0.0, 0.0);
        assert_at(&corners[3], 1.0 / 3.0, FRAC_PI_8);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    fn test_corner_count(#[case] step: usize) {
        let index = HealpixIndex::new(4).unwrap();
        for pix in [0, 17, 95, 100, 191] {
            assert_eq!(index.corners_nest(pix, step).unwrap().len(), 4 * step);
            assert_eq!(index.corners_ring(pix, step).unwrap().len(), 4 * step);
        }
    }

    #[rstest]
    #[case(2)]
    #[case(4)]
    #[case(16)]
    fn test_corners_surround_centre(#[case] nside: i64) {
        let index = HealpixIndex::new(nside).unwrap();
        let max_rad = index.max_pixrad();
        for pix in 0..index.npix() {
            let centre = index.pix2vec_nest(pix).unwrap();
            let corners = index.corners_nest(pix, 1).unwrap();
            let zc = centre.z();
            // North vertex above the centre, south vertex below
            assert!(corners[0].z() > zc && corners[2].z() < zc, "pixel {}", pix);
            for corner in &corners {
                assert_abs_diff_eq!(corner.length(), 1.0, epsilon = 1e-12);
                assert!(corner.angle(&centre) <= max_rad + 1e-9, "pixel {}", pix);
            }
        }
    }

    #[test]
    fn test_subdivided_sides_keep_vertices() {
        let index = HealpixIndex::new(8).unwrap();
        for pix in [3, 200, 450, 700] {
            let corners = index.corners_nest(pix, 1).unwrap();
            let sampled = index.corners_nest(pix, 3).unwrap();
            assert_eq!(sampled.len(), 12);
            // North, west, south and east vertices sit at indices 0, step, 2*step, 3*step
            for (k, corner) in corners.iter().enumerate() {
                assert!(corner.angle(&sampled[3 * k]) < 1e-12, "pixel {} vertex {}", pix, k);
            }
            // Western samples run from north to south
            for w in sampled[0..=6].windows(2) {
                assert!(w[0].z() >= w[1].z());
            }
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let index = HealpixIndex::new(4).unwrap();
        assert_eq!(index.corners_nest(0, 0), Err(HealpixError::InvalidStep(0)));
        assert!(matches!(
            index.corners_nest(192, 1),
            Err(HealpixError::PixelOutOfRange { .. })
        ));
        assert!(index.corners_ring(-1, 1).is_err());
    }
}
