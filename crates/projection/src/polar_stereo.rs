//! Polar stereographic projection on a sphere.
//!
//! The projection plane touches the north or south pole. The tangent
//! longitude runs vertically through the pole (toward -y from the north
//! pole, +y from the south pole) and the grid is offset so the origin point
//! maps to (0, 0).

use radar_common::{
    normalize_lon, normalize_lon_rad, RadarError, RadarResult, DEG_TO_RAD, EARTH_RADIUS_KM,
    RAD_TO_DEG, TINY_ANGLE, TINY_FLOAT,
};
use std::f64::consts::FRAC_PI_4;

use crate::calc::ProjectionMath;
use crate::flat::check_origin;
use crate::params::PoleType;

#[derive(Debug, Clone, PartialEq)]
pub struct PolarStereographic {
    tangent_lon: f64,
    pole: PoleType,
    central_scale: f64,
    origin_lat: f64,
    origin_lon: f64,
    /// Pole-centred coordinates of the origin
    offset: (f64, f64),
}

impl PolarStereographic {
    pub fn new(
        tangent_lon: f64,
        pole: PoleType,
        central_scale: f64,
        origin_lat: f64,
        origin_lon: f64,
    ) -> RadarResult<Self> {
        check_origin(origin_lat, origin_lon)?;
        if !tangent_lon.is_finite() {
            return Err(RadarError::invalid_param("tangent_lon", "must be finite"));
        }
        check_central_scale(central_scale)?;

        let opposite = match pole {
            PoleType::North => origin_lat < -90.0 + TINY_ANGLE,
            PoleType::South => origin_lat > 90.0 - TINY_ANGLE,
        };
        if opposite {
            return Err(RadarError::invalid_param(
                "origin_lat",
                "origin cannot be at the pole opposite the tangent pole",
            ));
        }

        let mut proj = Self {
            tangent_lon,
            pole,
            central_scale,
            origin_lat,
            origin_lon,
            offset: (0.0, 0.0),
        };
        proj.offset = proj.pole_xy(origin_lat, origin_lon);
        Ok(proj)
    }

    pub fn pole(&self) -> PoleType {
        self.pole
    }

    pub fn tangent_lon(&self) -> f64 {
        self.tangent_lon
    }

    pub fn central_scale(&self) -> f64 {
        self.central_scale
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lat, self.origin_lon)
    }

    fn plane_scale(&self) -> f64 {
        2.0 * EARTH_RADIUS_KM * self.central_scale
    }

    /// Coordinates relative to the pole.
    fn pole_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let phi = lat * DEG_TO_RAD;
        let dlon = normalize_lon_rad((lon - self.tangent_lon) * DEG_TO_RAD);
        let (sin_dlon, cos_dlon) = dlon.sin_cos();
        match self.pole {
            PoleType::North => {
                let rho = self.plane_scale() * (FRAC_PI_4 - phi / 2.0).tan();
                (rho * sin_dlon, -rho * cos_dlon)
            }
            PoleType::South => {
                let rho = self.plane_scale() * (FRAC_PI_4 + phi / 2.0).tan();
                (rho * sin_dlon, rho * cos_dlon)
            }
        }
    }
}

impl ProjectionMath for PolarStereographic {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (px, py) = self.pole_xy(lat, lon);
        (px - self.offset.0, py - self.offset.1)
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let px = x + self.offset.0;
        let py = y + self.offset.1;
        let rho = px.hypot(py);

        let pole_lat = match self.pole {
            PoleType::North => 90.0,
            PoleType::South => -90.0,
        };
        if rho < TINY_FLOAT {
            return (pole_lat, normalize_lon(self.tangent_lon));
        }

        let c = 2.0 * (rho / self.plane_scale()).atan() * RAD_TO_DEG;
        let (lat, dlon) = match self.pole {
            PoleType::North => (90.0 - c, px.atan2(-py)),
            PoleType::South => (c - 90.0, px.atan2(py)),
        };
        (lat, normalize_lon(self.tangent_lon + dlon * RAD_TO_DEG))
    }
}

pub(crate) fn check_central_scale(central_scale: f64) -> RadarResult<()> {
    if !central_scale.is_finite() || central_scale <= 0.0 {
        return Err(RadarError::invalid_param(
            "central_scale",
            format!("must be positive, got {}", central_scale),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = PolarStereographic::new(-105.0, PoleType::North, 1.0, 60.0, -100.0).unwrap();
        let (x, y) = proj.latlon_to_xy(60.0, -100.0);
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_pole_round_trip() {
        let proj = PolarStereographic::new(0.0, PoleType::North, 1.0, 90.0, 0.0).unwrap();
        let (x, y) = proj.latlon_to_xy(90.0, 0.0);
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
        let (lat, lon) = proj.xy_to_latlon(0.0, 0.0);
        assert_eq!(lat, 90.0);
        assert_eq!(lon, 0.0);
    }

    #[test]
    fn test_tangent_meridian_runs_along_y() {
        let proj = PolarStereographic::new(-80.0, PoleType::North, 1.0, 90.0, 0.0).unwrap();
        let (x, y) = proj.latlon_to_xy(70.0, -80.0);
        assert!(x.abs() < 1e-9);
        assert!(y < 0.0);
    }

    #[test]
    fn test_south_pole_round_trip() {
        let proj = PolarStereographic::new(0.0, PoleType::South, 0.97, -70.0, 140.0).unwrap();
        for (lat, lon) in [(-65.0, 150.0), (-85.0, -30.0), (-70.0, 140.0)] {
            let (x, y) = proj.latlon_to_xy(lat, lon);
            let (lat2, lon2) = proj.xy_to_latlon(x, y);
            assert!((lat - lat2).abs() < 1e-9);
            assert!((lon - lon2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_central_scale_shrinks_distances() {
        let unit = PolarStereographic::new(0.0, PoleType::North, 1.0, 90.0, 0.0).unwrap();
        let scaled = PolarStereographic::new(0.0, PoleType::North, 0.9, 90.0, 0.0).unwrap();
        let (_, y1) = unit.latlon_to_xy(60.0, 0.0);
        let (_, y2) = scaled.latlon_to_xy(60.0, 0.0);
        assert!((y2 / y1 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_params() {
        assert!(PolarStereographic::new(0.0, PoleType::North, 0.0, 60.0, 0.0).is_err());
        assert!(PolarStereographic::new(0.0, PoleType::North, 1.0, -90.0, 0.0).is_err());
        assert!(PolarStereographic::new(0.0, PoleType::South, 1.0, 90.0, 0.0).is_err());
    }
}
