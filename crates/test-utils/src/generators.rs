//! Seeded sample generators for round-trip and property tests.
//!
//! Every generator takes an explicit seed so failures are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A start point plus a range/bearing offset.
#[derive(Debug, Clone, Copy)]
pub struct RangeBearingSample {
    pub lat: f64,
    pub lon: f64,
    pub range_km: f64,
    pub bearing_deg: f64,
}

/// Create a deterministic RNG.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generate range/bearing samples.
///
/// # Arguments
///
/// * `count` - Number of samples
/// * `max_abs_lat` - Latitudes are drawn from `[-max_abs_lat, max_abs_lat]`
/// * `range_km` - Inclusive range interval in km
/// * `seed` - RNG seed
pub fn range_bearing_samples(
    count: usize,
    max_abs_lat: f64,
    range_km: (f64, f64),
    seed: u64,
) -> Vec<RangeBearingSample> {
    let mut rng = seeded_rng(seed);
    (0..count)
        .map(|_| RangeBearingSample {
            lat: rng.gen_range(-max_abs_lat..=max_abs_lat),
            lon: rng.gen_range(-180.0..=180.0),
            range_km: rng.gen_range(range_km.0..=range_km.1),
            bearing_deg: rng.gen_range(0.0..360.0),
        })
        .collect()
}

/// Generate lat/lon points inside a box `(min_lon, min_lat, max_lon, max_lat)`.
pub fn latlon_points(count: usize, bbox: (f64, f64, f64, f64), seed: u64) -> Vec<(f64, f64)> {
    let (min_lon, min_lat, max_lon, max_lat) = bbox;
    let mut rng = seeded_rng(seed);
    (0..count)
        .map(|_| {
            (
                rng.gen_range(min_lat..=max_lat),
                rng.gen_range(min_lon..=max_lon),
            )
        })
        .collect()
}

/// Regular lat/lon lattice around a centre point, `n x n` points spaced
/// `step` degrees apart.
pub fn latlon_lattice(center: (f64, f64), n: usize, step: f64) -> Vec<(f64, f64)> {
    let half = (n as f64 - 1.0) / 2.0;
    let mut points = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            points.push((
                center.0 + (j as f64 - half) * step,
                center.1 + (i as f64 - half) * step,
            ));
        }
    }
    points
}

/// Aircraft attitude values in degrees: (roll, pitch, heading, drift,
/// rotation, tilt).
pub fn attitude_samples(count: usize, seed: u64) -> Vec<[f64; 6]> {
    let mut rng = seeded_rng(seed);
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(0.0..360.0),
                rng.gen_range(-8.0..8.0),
                rng.gen_range(0.0..360.0),
                rng.gen_range(-25.0..25.0),
            ]
        })
        .collect()
}
