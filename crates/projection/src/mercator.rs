//! Normal Mercator projection on a sphere.
//!
//! The origin maps to (0, 0): x grows east from the origin meridian and y
//! is measured from the origin parallel.

use radar_common::{
    normalize_lon, normalize_lon_rad, RadarError, RadarResult, DEG_TO_RAD, EARTH_RADIUS_KM,
    RAD_TO_DEG, TINY_ANGLE, TINY_FLOAT,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::calc::ProjectionMath;
use crate::flat::check_origin;

#[derive(Debug, Clone, PartialEq)]
pub struct Mercator {
    origin_lat: f64,
    origin_lon: f64,
    /// Isometric latitude of the origin parallel
    y0: f64,
}

impl Mercator {
    pub fn new(origin_lat: f64, origin_lon: f64) -> RadarResult<Self> {
        check_origin(origin_lat, origin_lon)?;
        if origin_lat.abs() > 90.0 - TINY_ANGLE {
            return Err(RadarError::invalid_param(
                "origin_lat",
                "Mercator origin cannot be at a pole",
            ));
        }
        Ok(Self {
            origin_lat,
            origin_lon,
            y0: isometric_lat(origin_lat * DEG_TO_RAD),
        })
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lat, self.origin_lon)
    }
}

impl ProjectionMath for Mercator {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let dlon = normalize_lon_rad((lon - self.origin_lon) * DEG_TO_RAD);
        let x = EARTH_RADIUS_KM * dlon;
        let y = EARTH_RADIUS_KM * (isometric_lat(lat * DEG_TO_RAD) - self.y0);
        (x, y)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let lat = 2.0 * (y / EARTH_RADIUS_KM + self.y0).exp().atan() - FRAC_PI_2;
        let lon = self.origin_lon + x / EARTH_RADIUS_KM * RAD_TO_DEG;
        (lat * RAD_TO_DEG, normalize_lon(lon))
    }
}

/// ln tan(pi/4 + phi/2), finite at the poles.
fn isometric_lat(phi: f64) -> f64 {
    (FRAC_PI_4 + phi / 2.0).tan().max(TINY_FLOAT).ln()
}
