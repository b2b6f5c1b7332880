//! Property tests over random sky positions
//!
//! Positions are drawn uniformly on the sphere from a seeded generator so
//! failures are reproducible.

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use healpix_index::{CornerCache, HealpixIndex, LongRangeSetBuilder, Scheme, SpatialVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

const SAMPLES: usize = 2000;

/// Uniform random (theta, phi) on the sphere
fn random_position(rng: &mut StdRng) -> (f64, f64) {
    let z: f64 = rng.gen_range(-1.0..1.0);
    let phi: f64 = rng.gen_range(0.0..2.0 * PI);
    (z.acos(), phi)
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(64)]
#[case(1024)]
#[case(16384)]
fn test_nested_and_ring_agree(#[case] nside: i64) {
    let index = HealpixIndex::new(nside).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..SAMPLES {
        let (theta, phi) = random_position(&mut rng);
        let nest = index.ang2pix_nest(theta, phi).unwrap();
        let ring = index.ang2pix_ring(theta, phi).unwrap();
        assert!((0..index.npix()).contains(&nest));
        assert_eq!(index.nest2ring(nest).unwrap(), ring);
        assert_eq!(index.ring2nest(ring).unwrap(), nest);
    }
}

#[rstest]
#[case(4)]
#[case(128)]
#[case(8192)]
fn test_point_is_near_its_pixel_centre(#[case] nside: i64) {
    let index = HealpixIndex::new(nside).unwrap();
    let max_rad = index.max_pixrad();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let (theta, phi) = random_position(&mut rng);
        let point = HealpixIndex::vector(theta, phi);
        let ipix = index.ang2pix_nest(theta, phi).unwrap();
        let centre = index.pix2vec_nest(ipix).unwrap();
        assert!(point.angle(&centre) <= max_rad * (1.0 + 1e-9));

        // The centre falls in its own pixel
        let polar = index.pix2ang_nest(ipix).unwrap();
        assert_eq!(index.ang2pix_nest(polar.theta, polar.phi).unwrap(), ipix);
    }
}

#[test]
fn test_nested_hierarchy() {
    let mut rng = StdRng::seed_from_u64(3);
    let indices: Vec<HealpixIndex> = (0..=10).map(|order| HealpixIndex::from_order(order).unwrap()).collect();
    for _ in 0..SAMPLES {
        let (theta, phi) = random_position(&mut rng);
        for pair in indices.windows(2) {
            let parent = pair[0].ang2pix_nest(theta, phi).unwrap();
            let child = pair[1].ang2pix_nest(theta, phi).unwrap();
            assert_eq!(child >> 2, parent);
        }
    }
}

#[test]
fn test_face_coordinates_round_trip() {
    let index = HealpixIndex::new(256).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..SAMPLES {
        let ipix = rng.gen_range(0..index.npix());
        let xyf = index.nest2xyf(ipix).unwrap();
        assert_eq!(index.xyf2nest(xyf).unwrap(), ipix);
        let ring = index.xyf2ring(xyf).unwrap();
        assert_eq!(index.ring2xyf(ring).unwrap(), xyf);
    }
}

#[test]
fn test_radec_and_vector_entry_points_agree() {
    let index = HealpixIndex::new(512).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..SAMPLES {
        let ra: f64 = rng.gen_range(0.0..360.0);
        let dec: f64 = rng.gen_range(-89.9..89.9);
        let v = SpatialVector::from_radec(ra, dec);
        let by_radec = index.radec2pix_nest(ra, dec).unwrap();
        assert_eq!(index.vec2pix_nest(&v).unwrap(), by_radec);
        assert_eq!(index.vec2pix_ring(&v).unwrap(), index.nest2ring(by_radec).unwrap());
        assert_abs_diff_eq!(v.ra().unwrap(), ra, epsilon = 1e-9);
        assert_abs_diff_eq!(v.dec().unwrap(), dec, epsilon = 1e-9);
    }
}

#[test]
fn test_disc_matches_brute_force() {
    let index = HealpixIndex::new(8).unwrap();
    let centres: Vec<SpatialVector> = (0..index.npix())
        .map(|ipix| index.pix2vec_nest(ipix).unwrap())
        .collect();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let (theta, phi) = random_position(&mut rng);
        let center = HealpixIndex::vector(theta, phi);
        let radius: f64 = rng.gen_range(0.0..PI);
        let result = index.query_disc_scheme(&center, radius, Scheme::Nested, false).unwrap();

        for (ipix, c) in centres.iter().enumerate() {
            let d = c.angle(&center);
            let found = result.binary_search(&(ipix as i64)).is_ok();
            if d < radius - 1e-9 {
                assert!(found, "pixel {} at {} missing from r={}", ipix, d, radius);
            } else if d > radius + 1e-9 {
                assert!(!found, "pixel {} at {} outside r={}", ipix, d, radius);
            }
        }
    }
}

#[test]
fn test_inclusive_disc_contains_center_pixel() {
    let index = HealpixIndex::new(16).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..SAMPLES {
        let (theta, phi) = random_position(&mut rng);
        let center = HealpixIndex::vector(theta, phi);
        let pixels = index.query_disc(&center, 0.05, true, true).unwrap();
        let own = index.vec2pix_nest(&center).unwrap();
        assert!(pixels.binary_search(&own).is_ok());
    }
}

#[test]
fn test_disc_ranges_are_compact() {
    let index = HealpixIndex::new(64).unwrap();
    let center = SpatialVector::from_radec(10.0, -45.0);
    let ring = index.query_disc(&center, 0.2, false, false).unwrap();

    let mut set = LongRangeSetBuilder::new();
    for &ipix in &ring {
        set.append(ipix);
    }
    assert_eq!(set.len(), ring.len());
    // At most two runs per ring crossed by the disc
    let rings: std::collections::BTreeSet<i64> = ring.iter().map(|&p| index.ring(p).unwrap()).collect();
    assert!(set.ranges().len() <= 2 * rings.len());
}

#[test]
fn test_corner_cache_agrees_with_index() {
    let mut cache = CornerCache::new().unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    for nside in [8, 16, 8, 2] {
        let index = HealpixIndex::new(nside).unwrap();
        for _ in 0..50 {
            let ipix = rng.gen_range(0..index.npix());
            assert_eq!(cache.corners_nest(ipix, nside).unwrap(), index.corners_nest(ipix, 1).unwrap());
        }
    }
}

#[test]
fn test_pixels_tile_the_sphere() {
    let index = HealpixIndex::new(32).unwrap();
    let mut counts = vec![0usize; index.npix() as usize];
    let mut rng = StdRng::seed_from_u64(23);
    let samples = 200 * index.npix() as usize;
    for _ in 0..samples {
        let (theta, phi) = random_position(&mut rng);
        counts[index.ang2pix_ring(theta, phi).unwrap() as usize] += 1;
    }
    // Equal areas: every pixel gets roughly the same share of uniform points
    let expected = samples as f64 / index.npix() as f64;
    for (ipix, &count) in counts.iter().enumerate() {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(deviation < 0.5, "pixel {} got {} samples, expected {}", ipix, count, expected);
    }
}
