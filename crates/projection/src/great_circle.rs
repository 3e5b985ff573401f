//! Great-circle range/bearing conversions on a spherical Earth.
//!
//! Ranges are in km along the surface; bearings are degrees clockwise from
//! true north.

use radar_common::{
    normalize_lon, normalize_lon_rad, DEG_TO_RAD, EARTH_RADIUS_KM, RAD_TO_DEG, TINY_ANGLE, TINY_DIST,
    TINY_FLOAT,
};

/// Range (km) and bearing (deg) from point 1 to point 2.
///
/// The bearing is in `(-180, 180]`, negative for destinations to the west.
/// Where the bearing is undefined (start at a pole, or points closer than
/// `TINY_DIST`) it is reported as 0.
pub fn latlon_to_r_theta(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> (f64, f64) {
    let colat1 = (90.0 - lat1) * DEG_TO_RAD;
    let colat2 = (90.0 - lat2) * DEG_TO_RAD;
    let delon = normalize_lon_rad((lon2 - lon1) * DEG_TO_RAD);

    let (sin_colat1, cos_colat1) = colat1.sin_cos();
    let (sin_colat2, cos_colat2) = colat2.sin_cos();
    let (sin_delon, cos_delon) = delon.sin_cos();

    let xx = (cos_colat1 * cos_colat2 + sin_colat1 * sin_colat2 * cos_delon).clamp(-1.0, 1.0);
    let darc = xx.acos();
    let r = darc * EARTH_RADIUS_KM;

    let denom = sin_colat1 * darc.sin();
    let degenerate =
        colat1.abs() * RAD_TO_DEG <= TINY_ANGLE || r <= TINY_DIST || denom.abs() <= TINY_FLOAT;

    // atan2 keeps the westward sign of delon and stays accurate along meridians
    let theta = if degenerate {
        0.0
    } else {
        (sin_delon * sin_colat2).atan2(sin_colat1 * cos_colat2 - cos_colat1 * sin_colat2 * cos_delon)
    };

    (r, theta * RAD_TO_DEG)
}

/// Destination reached from point 1 after `r_km` along bearing `theta_deg`.
///
/// The returned longitude is in `[-180, 180]`.
pub fn latlon_plus_r_theta(lat1: f64, lon1: f64, r_km: f64, theta_deg: f64) -> (f64, f64) {
    let darc = r_km / EARTH_RADIUS_KM;
    let colat1 = (90.0 - lat1) * DEG_TO_RAD;
    let theta = theta_deg * DEG_TO_RAD;

    let (sin_colat1, cos_colat1) = colat1.sin_cos();
    let (sin_darc, cos_darc) = darc.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    let xx = (cos_colat1 * cos_darc + sin_colat1 * sin_darc * cos_theta).clamp(-1.0, 1.0);
    let colat2 = xx.acos();
    let lat2 = 90.0 - colat2 * RAD_TO_DEG;

    // delta-lon takes the sign of sin(theta)
    let denom = sin_colat1 * colat2.sin();
    let delta_lon = if denom.abs() <= TINY_FLOAT {
        0.0
    } else {
        (sin_theta * sin_darc * sin_colat1).atan2(cos_darc - cos_colat1 * colat2.cos())
    };

    let lon2 = normalize_lon(lon1 + delta_lon * RAD_TO_DEG);
    (lat2, lon2)
}
