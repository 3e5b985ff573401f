//! Map projections and great-circle geometry for radar gridding.
//!
//! All projections assume a spherical Earth of radius
//! [`radar_common::EARTH_RADIUS_KM`]. Projected coordinates are in km except
//! for the lat/lon grid (degrees) and the polar radar grid (km, degrees).

pub mod calc;
pub mod flat;
pub mod great_circle;
pub mod lambert;
pub mod latlon;
pub mod mercator;
pub mod oblique_stereo;
pub mod params;
pub mod polar_radar;
pub mod polar_stereo;

pub use calc::{ProjectionCalc, ProjectionKind, ProjectionMath};
pub use flat::FlatProjection;
pub use great_circle::{latlon_plus_r_theta, latlon_to_r_theta};
pub use lambert::LambertConformal;
pub use latlon::LatLonProjection;
pub use mercator::Mercator;
pub use oblique_stereo::ObliqueStereographic;
pub use params::{PoleType, ProjType, ProjectionParams};
pub use polar_radar::PolarRadar;
pub use polar_stereo::PolarStereographic;
