//! Airborne radar beam geometry.
//!
//! Converts the antenna rotation/tilt of a tail or fuselage radar, together
//! with the aircraft attitude, into earth-relative beam angles.

pub mod corrector;
pub mod nav;
pub mod types;

pub use corrector::correct_beam_angles;
pub use nav::{nav_azimuth_angle, nav_elevation_angle, nav_rotation_angle, nav_tilt_angle};
pub use types::{
    Algorithm, BeamAngles, CorrectionFactors, CorrectionInputs, PlatformAttitude, RadarType,
    RayAngles, ScanMode,
};
