//! Lambert Conformal Conic projection.
//!
//! Maps a cone tangent or secant to the sphere onto a flat plane. The
//! projection parameters are:
//! - Origin latitude and longitude: the origin maps to (0, 0) and the
//!   origin longitude is the central meridian
//! - Standard parallel(s): lat1 and lat2 (equal for a tangent cone)
//!
//! Both standard parallels must lie in the same hemisphere, away from the
//! equator and the poles.

use radar_common::{
    normalize_lon, normalize_lon_rad, RadarError, RadarResult, DEG_TO_RAD, EARTH_RADIUS_KM,
    RAD_TO_DEG, TINY_ANGLE, TINY_FLOAT,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::calc::ProjectionMath;
use crate::flat::check_origin;

#[derive(Debug, Clone, PartialEq)]
pub struct LambertConformal {
    /// Origin latitude in degrees
    origin_lat: f64,
    /// Central meridian in degrees
    origin_lon: f64,
    /// First standard parallel in degrees
    lat1: f64,
    /// Second standard parallel in degrees
    lat2: f64,
    /// Cone constant (n)
    n: f64,
    /// F constant, pre-multiplied by the Earth radius
    rf: f64,
    /// Rho at the origin
    rho0: f64,
}

impl LambertConformal {
    /// Tangent cone touching the sphere at `lat1`.
    pub fn tangent(origin_lat: f64, origin_lon: f64, lat1: f64) -> RadarResult<Self> {
        Self::secant(origin_lat, origin_lon, lat1, lat1)
    }

    /// Secant cone cutting the sphere at `lat1` and `lat2`.
    ///
    /// Equal parallels degrade to the tangent cone.
    pub fn secant(origin_lat: f64, origin_lon: f64, lat1: f64, lat2: f64) -> RadarResult<Self> {
        check_origin(origin_lat, origin_lon)?;
        check_parallel("lat1", lat1)?;
        check_parallel("lat2", lat2)?;
        if lat1.signum() != lat2.signum() {
            return Err(RadarError::invalid_param(
                "lat2",
                format!(
                    "standard parallels must share a hemisphere, got {} and {}",
                    lat1, lat2
                ),
            ));
        }

        let phi1 = lat1 * DEG_TO_RAD;
        let phi2 = lat2 * DEG_TO_RAD;

        // Compute cone constant n
        let n = if (lat1 - lat2).abs() < TINY_ANGLE {
            phi1.sin()
        } else {
            let ln_ratio = (phi1.cos() / phi2.cos()).ln();
            let tan_ratio = (half_colat_tan(phi2) / half_colat_tan(phi1)).ln();
            ln_ratio / tan_ratio
        };

        let rf = EARTH_RADIUS_KM * phi1.cos() * half_colat_tan(phi1).powf(n) / n;

        let mut proj = Self {
            origin_lat,
            origin_lon,
            lat1,
            lat2,
            n,
            rf,
            rho0: 0.0,
        };
        proj.rho0 = proj.rho(origin_lat * DEG_TO_RAD);
        Ok(proj)
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_lat, self.origin_lon)
    }

    pub fn standard_parallels(&self) -> (f64, f64) {
        (self.lat1, self.lat2)
    }

    /// Cone constant.
    pub fn cone_constant(&self) -> f64 {
        self.n
    }

    /// Whether both standard parallels coincide.
    pub fn is_tangent(&self) -> bool {
        (self.lat1 - self.lat2).abs() < TINY_ANGLE
    }

    fn rho(&self, phi: f64) -> f64 {
        self.rf / half_colat_tan(phi).max(TINY_FLOAT).powf(self.n)
    }
}

impl ProjectionMath for LambertConformal {
    fn latlon_to_xy(&self, lat: f64, lon: f64) -> (f64, f64) {
        let dlon = normalize_lon_rad((lon - self.origin_lon) * DEG_TO_RAD);
        let rho = self.rho(lat * DEG_TO_RAD);
        let theta = self.n * dlon;
        (rho * theta.sin(), self.rho0 - rho * theta.cos())
    }

    fn xy_to_latlon(&self, x: f64, y: f64) -> (f64, f64) {
        let sign = self.n.signum();
        let dy = self.rho0 - y;
        let rho = sign * x.hypot(dy);

        if rho.abs() < TINY_FLOAT {
            // apex of the cone
            return (sign * 90.0, normalize_lon(self.origin_lon));
        }

        let theta = (sign * x).atan2(sign * dy);
        let lat = 2.0 * (self.rf / rho).powf(1.0 / self.n).atan() - FRAC_PI_2;
        let lon = self.origin_lon + theta / self.n * RAD_TO_DEG;

        (lat * RAD_TO_DEG, normalize_lon(lon))
    }
}

fn half_colat_tan(phi: f64) -> f64 {
    (FRAC_PI_4 + phi / 2.0).tan()
}

fn check_parallel(name: &str, lat: f64) -> RadarResult<()> {
    if !lat.is_finite() || lat.abs() < TINY_ANGLE || lat.abs() > 90.0 - TINY_ANGLE {
        return Err(RadarError::invalid_param(
            name,
            format!("standard parallel must lie strictly between the equator and a pole, got {}", lat),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conus() -> LambertConformal {
        LambertConformal::secant(38.5, -97.5, 33.0, 45.0).unwrap()
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = conus();
        let (x, y) = proj.latlon_to_xy(38.5, -97.5);
        assert!(x.abs() < 1e-9, "x should be ~0, got {}", x);
        assert!(y.abs() < 1e-9, "y should be ~0, got {}", y);
    }

    #[test]
    fn test_roundtrip_conus() {
        let proj = conus();
        for (lat, lon) in [(39.0, -94.5), (25.0, -80.0), (48.0, -122.0), (30.0, -97.5)] {
            let (x, y) = proj.latlon_to_xy(lat, lon);
            let (lat2, lon2) = proj.xy_to_latlon(x, y);
            assert!((lat - lat2).abs() < 1e-9, "lat roundtrip failed: {} vs {}", lat, lat2);
            assert!((lon - lon2).abs() < 1e-9, "lon roundtrip failed: {} vs {}", lon, lon2);
        }
    }

    #[test]
    fn test_east_is_positive_x() {
        let proj = conus();
        let (x, _) = proj.latlon_to_xy(38.5, -90.0);
        assert!(x > 0.0);
        let (_, y) = proj.latlon_to_xy(45.0, -97.5);
        assert!(y > 0.0);
    }

    #[test]
    fn test_tangent_cone_constant() {
        let proj = LambertConformal::tangent(25.0, 0.0, 25.0).unwrap();
        assert!(proj.is_tangent());
        assert!((proj.cone_constant() - (25.0 * DEG_TO_RAD).sin()).abs() < 1e-12);

        // equal parallels through the secant constructor give the same cone
        let same = LambertConformal::secant(25.0, 0.0, 25.0, 25.0).unwrap();
        assert_eq!(proj, same);
    }

    #[test]
    fn test_secant_scale_is_true_on_parallels() {
        // along a standard parallel, 1 degree of longitude spans R cos(lat)
        let proj = conus();
        for lat in [33.0, 45.0] {
            let (x0, y0) = proj.latlon_to_xy(lat, -97.5);
            let (x1, y1) = proj.latlon_to_xy(lat, -97.4);
            let chord = (x1 - x0).hypot(y1 - y0);
            let expected = EARTH_RADIUS_KM * (lat * DEG_TO_RAD).cos() * 0.1 * DEG_TO_RAD;
            assert!((chord - expected).abs() / expected < 1e-5);
        }
    }

    #[test]
    fn test_southern_hemisphere() {
        let proj = LambertConformal::secant(-30.0, 135.0, -20.0, -40.0).unwrap();
        assert!(proj.cone_constant() < 0.0);
        let (x, y) = proj.latlon_to_xy(-35.0, 140.0);
        let (lat, lon) = proj.xy_to_latlon(x, y);
        assert!((lat + 35.0).abs() < 1e-9);
        assert!((lon - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_apex_is_pole() {
        let proj = conus();
        let (x, y) = proj.latlon_to_xy(90.0, 0.0);
        let (lat, _) = proj.xy_to_latlon(x, y);
        assert!((lat - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_parallels() {
        assert!(LambertConformal::secant(0.0, 0.0, 0.0, 30.0).is_err());
        assert!(LambertConformal::secant(0.0, 0.0, 30.0, -30.0).is_err());
        assert!(LambertConformal::tangent(0.0, 0.0, 90.0).is_err());
    }
}
