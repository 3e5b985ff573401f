//! Physical constants and numerical tolerances.
//!
//! Every projection and great-circle routine uses the same spherical Earth,
//! so the radius lives here and nowhere else.

use std::f64::consts::PI;

/// Earth radius used by all spherical computations (km).
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// An angle (degrees) smaller than this is treated as zero.
pub const TINY_ANGLE: f64 = 1.0e-4;

/// A distance (km) smaller than this is treated as zero.
pub const TINY_DIST: f64 = 1.0e-2;

/// A dimensionless value smaller than this is treated as zero.
pub const TINY_FLOAT: f64 = 1.0e-10;
