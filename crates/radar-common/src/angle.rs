//! Angle normalization helpers.

use std::f64::consts::{PI, TAU};

/// Reduce an angle in degrees into `[0, 360)`.
#[inline]
pub fn fmod360(deg: f64) -> f64 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Normalize a longitude in degrees into `[-180, 180]`.
///
/// Values above 180 land in `(-180, 180]`, values below -180 in
/// `[-180, 180)`. Non-finite input yields NaN.
#[inline]
pub fn normalize_lon(lon: f64) -> f64 {
    if !lon.is_finite() {
        return f64::NAN;
    }
    if lon > 180.0 {
        let wrapped = (lon - 180.0).rem_euclid(360.0) - 180.0;
        if wrapped <= -180.0 {
            180.0
        } else {
            wrapped
        }
    } else if lon < -180.0 {
        let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
        wrapped.min(180.0)
    } else {
        lon
    }
}

/// Normalize a longitude difference in radians into `(-PI, PI]`.
///
/// Non-finite input yields NaN.
#[inline]
pub fn normalize_lon_rad(dlon: f64) -> f64 {
    if !dlon.is_finite() {
        return f64::NAN;
    }
    if dlon > -PI && dlon <= PI {
        return dlon;
    }
    let wrapped = (dlon + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped.min(PI)
    }
}
