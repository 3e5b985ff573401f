//! Oblique stereographic projection on a sphere, tangent at the origin.

use radar_common::{
    normalize_lon, normalize_lon_rad, RadarResult, DEG_TO_RAD, EARTH_RADIUS_KM, RAD_TO_DEG,
    TINY_FLOAT,
};

use crate::calc::ProjectionMath;
use crate::flat::check_origin;
use crate::polar_stereo::check_central_scale;

#[derive(Debug, Clone, PartialEq)]
pub struct ObliqueStereographic {
    origin_lat: f64,
    origin_lon: f64,
    central_scale: f64,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl ObliqueStereographic {
    pub fn new(origin_lat: f64, origin_lon: f64, central_scale: f64) -> RadarResult<Self> {
        check_origin(origin_lat, origin_lon)?;
        check_central_scale(central_scale)?;
        let (sin_lat0, cos_lat0) = (origin_lat * DEG_TO_RAD).sin_cos();
        Ok(Self {
            origin_lat,
            origin_lon,
            central_scale,
            sin_lat0,
            cos_lat0,
        })
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lat, self.origin_lon)
    }

    pub fn central_scale(&self) -> f64 {
        self.central_scale
    }
}

impl ProjectionMath for ObliqueStereographic {
    /// The antipode of the origin has no image; points near it project far
    /// out but stay finite.
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (sin_lat, cos_lat) = (lat * DEG_TO_RAD).sin_cos();
        let dlon = normalize_lon_rad((lon - self.origin_lon) * DEG_TO_RAD);
        let (sin_dlon, cos_dlon) = dlon.sin_cos();

        let cos_c = self.sin_lat0 * sin_lat + self.cos_lat0 * cos_lat * cos_dlon;
        let k = 2.0 * self.central_scale / (1.0 + cos_c).max(TINY_FLOAT);

        let x = EARTH_RADIUS_KM * k * cos_lat * sin_dlon;
        let y = EARTH_RADIUS_KM * k * (self.cos_lat0 * sin_lat - self.sin_lat0 * cos_lat * cos_dlon);
        (x, y)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let rho = x.hypot(y);
        if rho < TINY_FLOAT {
            return (self.origin_lat, normalize_lon(self.origin_lon));
        }

        let c = 2.0 * (rho / (2.0 * EARTH_RADIUS_KM * self.central_scale)).atan();
        let (sin_c, cos_c) = c.sin_cos();

        let sin_lat = (cos_c * self.sin_lat0 + y * sin_c * self.cos_lat0 / rho).clamp(-1.0, 1.0);
        let dlon = (x * sin_c).atan2(rho * self.cos_lat0 * cos_c - y * self.sin_lat0 * sin_c);

        (
            sin_lat.asin() * RAD_TO_DEG,
            normalize_lon(self.origin_lon + dlon * RAD_TO_DEG),
        )
    }
}
