//! Polar radar grid: x is range (km) from the radar, y is azimuth
//! (degrees clockwise from true north, in `[0, 360)`).

use radar_common::{fmod360, RadarResult};

use crate::calc::ProjectionMath;
use crate::flat::check_origin;
use crate::great_circle::{latlon_plus_r_theta, latlon_to_r_theta};

#[derive(Debug, Clone, PartialEq)]
pub struct PolarRadar {
    origin_lat: f64,
    origin_lon: f64,
}

impl PolarRadar {
    pub fn new(origin_lat: f64, origin_lon: f64) -> RadarResult<Self> {
        check_origin(origin_lat, origin_lon)?;
        Ok(Self {
            origin_lat,
            origin_lon,
        })
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lat, self.origin_lon)
    }
}

impl ProjectionMath for PolarRadar {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (r, theta) = latlon_to_r_theta(self.origin_lat, self.origin_lon, lat, lon);
        (r, fmod360(theta))
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        latlon_plus_r_theta(self.origin_lat, self.origin_lon, x, y)
    }
}
