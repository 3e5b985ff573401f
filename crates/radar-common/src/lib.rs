//! Common types and utilities shared across the radar geometry crates.

pub mod angle;
pub mod constants;
pub mod error;
pub mod grid;

pub use angle::{fmod360, normalize_lon, normalize_lon_rad};
pub use constants::{DEG_TO_RAD, EARTH_RADIUS_KM, RAD_TO_DEG, TINY_ANGLE, TINY_DIST, TINY_FLOAT};
pub use error::{RadarError, RadarResult};
pub use grid::GridSpec;
