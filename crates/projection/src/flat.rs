//! Flat radar projection: azimuthal equidistant about the radar, with the
//! grid optionally rotated clockwise from true north.

use radar_common::{RadarError, RadarResult, DEG_TO_RAD, RAD_TO_DEG};

use crate::calc::ProjectionMath;
use crate::great_circle::{latlon_plus_r_theta, latlon_to_r_theta};

#[derive(Debug, Clone, PartialEq)]
pub struct FlatProjection {
    origin_lat: f64,
    origin_lon: f64,
    /// Grid rotation in degrees
    rotation: f64,
}

impl FlatProjection {
    pub fn new(origin_lat: f64, origin_lon: f64, rotation: f64) -> RadarResult<Self> {
        check_origin(origin_lat, origin_lon)?;
        if !rotation.is_finite() {
            return Err(RadarError::invalid_param("rotation", "must be finite"));
        }
        Ok(Self {
            origin_lat,
            origin_lon,
            rotation,
        })
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lat, self.origin_lon)
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

impl ProjectionMath for FlatProjection {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (r, theta) = latlon_to_r_theta(self.origin_lat, self.origin_lon, lat, lon);
        let grid_theta = (theta - self.rotation) * DEG_TO_RAD;
        (r * grid_theta.sin(), r * grid_theta.cos())
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let r = x.hypot(y);
        let theta = if r == 0.0 {
            0.0
        } else {
            x.atan2(y) * RAD_TO_DEG + self.rotation
        };
        latlon_plus_r_theta(self.origin_lat, self.origin_lon, r, theta)
    }
}

/// Reject origins off the globe.
pub(crate) fn check_origin(lat: f64, lon: f64) -> RadarResult<()> {
    if !lat.is_finite() || lat.abs() > 90.0 {
        return Err(RadarError::invalid_param(
            "origin_lat",
            format!("must be within [-90, 90], got {}", lat),
        ));
    }
    if !lon.is_finite() {
        return Err(RadarError::invalid_param("origin_lon", "must be finite"));
    }
    Ok(())
}
