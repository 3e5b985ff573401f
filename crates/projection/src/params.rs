//! Serializable projection descriptions.

use radar_common::GridSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Projection type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjType {
    /// Azimuthal equidistant about a radar origin, with grid rotation (km)
    #[serde(rename = "FLAT")]
    Flat,
    /// Plain lat/lon grid (degrees)
    #[serde(rename = "LATLON")]
    LatLon,
    /// Lambert conformal conic, one tangent parallel (km)
    #[serde(rename = "LAMBERT_CONFORMAL_1")]
    LambertConformal1,
    /// Lambert conformal conic, two standard parallels (km)
    #[serde(rename = "LAMBERT_CONFORMAL_2")]
    LambertConformal2,
    /// Normal Mercator (km)
    #[serde(rename = "MERCATOR")]
    Mercator,
    /// Range (km) and azimuth (deg) from a radar origin
    #[serde(rename = "POLAR_RADAR")]
    PolarRadar,
    /// Polar stereographic (km)
    #[serde(rename = "POLAR_STEREOGRAPHIC")]
    PolarStereographic,
    /// Oblique stereographic about the origin (km)
    #[serde(rename = "OBLIQUE_STEREOGRAPHIC")]
    ObliqueStereographic,
}

impl ProjType {
    pub const ALL: [ProjType; 8] = [
        ProjType::Flat,
        ProjType::LatLon,
        ProjType::LambertConformal1,
        ProjType::LambertConformal2,
        ProjType::Mercator,
        ProjType::PolarRadar,
        ProjType::PolarStereographic,
        ProjType::ObliqueStereographic,
    ];

    /// Tag used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjType::Flat => "FLAT",
            ProjType::LatLon => "LATLON",
            ProjType::LambertConformal1 => "LAMBERT_CONFORMAL_1",
            ProjType::LambertConformal2 => "LAMBERT_CONFORMAL_2",
            ProjType::Mercator => "MERCATOR",
            ProjType::PolarRadar => "POLAR_RADAR",
            ProjType::PolarStereographic => "POLAR_STEREOGRAPHIC",
            ProjType::ObliqueStereographic => "OBLIQUE_STEREOGRAPHIC",
        }
    }
}

impl fmt::Display for ProjType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tangent pole of a polar stereographic projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoleType {
    #[default]
    North,
    South,
}

/// Flat projection description, as read from configuration.
///
/// Only the fields relevant to `proj_type` are used:
///
/// | proj_type             | fields                                          |
/// |-----------------------|-------------------------------------------------|
/// | FLAT                  | origin, `rotation`                              |
/// | LATLON                | none                                            |
/// | LAMBERT_CONFORMAL_1   | origin, `lat1`                                  |
/// | LAMBERT_CONFORMAL_2   | origin, `lat1`, `lat2`                          |
/// | MERCATOR              | origin                                          |
/// | POLAR_RADAR           | origin                                          |
/// | POLAR_STEREOGRAPHIC   | origin, `tangent_lon`, `pole`, `central_scale`  |
/// | OBLIQUE_STEREOGRAPHIC | origin, `central_scale`                         |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    pub proj_type: ProjType,
    #[serde(flatten)]
    pub grid: GridSpec,
    #[serde(default)]
    pub origin_lat: f64,
    #[serde(default)]
    pub origin_lon: f64,
    /// Grid rotation, degrees clockwise from true north (FLAT)
    #[serde(default)]
    pub rotation: f64,
    /// First standard parallel (Lambert)
    #[serde(default)]
    pub lat1: f64,
    /// Second standard parallel (Lambert 2)
    #[serde(default)]
    pub lat2: f64,
    #[serde(default)]
    pub tangent_lon: f64,
    #[serde(default)]
    pub pole: PoleType,
    #[serde(default = "default_central_scale")]
    pub central_scale: f64,
}

fn default_central_scale() -> f64 {
    1.0
}

impl ProjectionParams {
    /// Parameters for the given projection with everything else defaulted.
    pub fn new(proj_type: ProjType, grid: GridSpec) -> Self {
        Self {
            proj_type,
            grid,
            origin_lat: 0.0,
            origin_lon: 0.0,
            rotation: 0.0,
            lat1: 0.0,
            lat2: 0.0,
            tangent_lon: 0.0,
            pole: PoleType::North,
            central_scale: default_central_scale(),
        }
    }

    pub fn with_origin(mut self, lat: f64, lon: f64) -> Self {
        self.origin_lat = lat;
        self.origin_lon = lon;
        self
    }
}
