//! Inputs and outputs of the beam angle correction.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Aircraft attitude and antenna pointing for one beam, in degrees.
///
/// Missing telemetry may be recorded as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformAttitude {
    pub roll: f64,
    pub pitch: f64,
    pub heading: f64,
    pub drift_angle: f64,
    /// Antenna rotation about the fuselage axis
    pub rotation_angle: f64,
    /// Antenna tilt from the plane normal to the fuselage
    pub tilt: f64,
}

/// Calibration offsets added to the recorded angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionFactors {
    pub roll_corr: f64,
    pub pitch_corr: f64,
    pub heading_corr: f64,
    pub drift_corr: f64,
    pub rot_angle_corr: f64,
    pub tilt_corr: f64,
    pub azimuth_corr: f64,
    pub elevation_corr: f64,
}

/// Raw ray pointing as recorded by the radar, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RayAngles {
    pub azimuth: f64,
    pub elevation: f64,
}

/// Radar platform, with DORADE numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RadarType {
    #[default]
    Ground,
    AirFore,
    AirAft,
    AirTail,
    /// Lower fuselage
    AirLf,
    Ship,
    AirNose,
    Satellite,
    LidarMoving,
    LidarFixed,
}

impl RadarType {
    pub fn from_code(code: i32) -> Option<Self> {
        let radar_type = match code {
            0 => RadarType::Ground,
            1 => RadarType::AirFore,
            2 => RadarType::AirAft,
            3 => RadarType::AirTail,
            4 => RadarType::AirLf,
            5 => RadarType::Ship,
            6 => RadarType::AirNose,
            7 => RadarType::Satellite,
            8 => RadarType::LidarMoving,
            9 => RadarType::LidarFixed,
            _ => return None,
        };
        Some(radar_type)
    }

    /// Antennas fixed to the airframe report ray azimuth/elevation instead
    /// of rotation/tilt.
    pub fn is_fixed_antenna(&self) -> bool {
        matches!(self, RadarType::AirLf | RadarType::AirNose)
    }
}

/// Antenna scan mode, with DORADE tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScanMode {
    #[serde(rename = "CAL")]
    Calibration,
    #[serde(rename = "PPI")]
    Ppi,
    #[serde(rename = "COP")]
    Coplane,
    #[serde(rename = "RHI")]
    Rhi,
    #[serde(rename = "VER")]
    Vertical,
    #[serde(rename = "TAR")]
    Target,
    #[serde(rename = "MAN")]
    Manual,
    #[serde(rename = "IDL")]
    Idle,
    #[serde(rename = "SUR")]
    Surveillance,
    /// Airborne rotating antenna
    #[default]
    #[serde(rename = "AIR")]
    Air,
    #[serde(rename = "HOR")]
    Horizontal,
}

/// Correction formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Wen-Chau Lee, "Mapping of the Airborne Doppler Radar Data"
    Lee,
    /// Testud et al., with psi and explicit quadrant fix-up
    #[default]
    Testud,
}

/// Everything the correction needs for one beam.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionInputs {
    pub attitude: PlatformAttitude,
    pub corrections: CorrectionFactors,
    pub radar_type: RadarType,
    pub ray: RayAngles,
}

/// Earth-relative beam pointing. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamAngles {
    /// Unit vector component toward the aircraft's right
    pub x: f64,
    /// Unit vector component toward the aircraft's nose
    pub y: f64,
    /// Unit vector component up
    pub z: f64,
    pub rotation_angle: f64,
    pub tilt: f64,
    /// Clockwise from true north, in `[0, 2pi)`
    pub azimuth: f64,
    pub elevation: f64,
    /// Angle between the beam and the horizontal aircraft velocity. Only
    /// the Testud formulation defines it.
    pub psi: Option<f64>,
}

impl BeamAngles {
    pub fn unit_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth.to_degrees()
    }

    pub fn elevation_deg(&self) -> f64 {
        self.elevation.to_degrees()
    }

    pub fn rotation_angle_deg(&self) -> f64 {
        self.rotation_angle.to_degrees()
    }

    pub fn tilt_deg(&self) -> f64 {
        self.tilt.to_degrees()
    }

    pub fn psi_deg(&self) -> Option<f64> {
        self.psi.map(f64::to_degrees)
    }
}
