//! Classification of an angle into one of a sequence of angular buckets.

use radar_common::fmod360;

/// Find the bucket containing `search_angle`.
///
/// `limits` holds `n + 1` non-decreasing bucket boundaries; bucket `i` is
/// `[limits[i], limits[i + 1])`. The angle is first taken relative to
/// `reference` and reduced modulo 360 into the window that starts at
/// `limits[0]`, so any multiple of 360 may be added to the search angle
/// without changing the result.
///
/// Returns `None` if the angle falls outside `[limits[0], limits[n])`.
pub fn angle_index(search_angle: f64, limits: &[f64], reference: f64) -> Option<usize> {
    let n = limits.len().checked_sub(1)?;
    if n == 0 || !search_angle.is_finite() {
        return None;
    }

    let lower = limits[0];
    let angle = lower + fmod360(search_angle - reference - lower);

    if angle < lower || angle >= limits[n] {
        return None;
    }

    // first limit strictly above the angle; limits[0] <= angle so idx >= 1
    let idx = limits.partition_point(|&l| l <= angle);
    Some(idx - 1)
}
