//! Per-beam navigation angles as reported for each scan mode, in degrees.
//!
//! Airborne scans report the attitude-corrected angles; other scan modes
//! report the recorded ray angles with their calibration offsets. The
//! lower fuselage radar's elevation is converted to earth-relative using
//! pitch and roll.

use radar_common::fmod360;

use crate::corrector::correct_beam_angles;
use crate::types::{Algorithm, CorrectionInputs, RadarType, ScanMode};

/// True azimuth of the beam, in `[0, 360)`.
pub fn nav_azimuth_angle(inputs: &CorrectionInputs, scan_mode: ScanMode, algorithm: Algorithm) -> f64 {
    if scan_mode == ScanMode::Air {
        return fmod360(correct_beam_angles(inputs, algorithm).azimuth_deg() + 360.0);
    }

    let azimuth = inputs.ray.azimuth;
    if azimuth.is_nan() {
        return 0.0;
    }
    let corrected = azimuth + inputs.corrections.azimuth_corr;
    if inputs.radar_type.is_fixed_antenna() {
        // fuselage antennas record azimuth relative to the nose
        fmod360(corrected + heading_deg(inputs))
    } else {
        fmod360(corrected)
    }
}

/// Elevation of the beam above the horizon.
pub fn nav_elevation_angle(inputs: &CorrectionInputs, scan_mode: ScanMode, algorithm: Algorithm) -> f64 {
    if scan_mode == ScanMode::Air {
        return correct_beam_angles(inputs, algorithm).elevation_deg();
    }
    let elevation = inputs.ray.elevation;
    if elevation.is_nan() {
        return 0.0;
    }
    let cfac = &inputs.corrections;
    if inputs.radar_type == RadarType::AirLf {
        // ray elevation is recorded relative to the airframe while the
        // antenna holds a constant elevation relative to the earth
        let el = (elevation + cfac.elevation_corr).to_radians();
        let az = (or_zero(inputs.ray.azimuth) + cfac.azimuth_corr).to_radians();
        let pitch = attitude_deg(inputs.attitude.pitch, cfac.pitch_corr).to_radians();
        let roll = attitude_deg(inputs.attitude.roll, cfac.roll_corr).to_radians();

        let z = az.cos() * el.cos() * pitch.sin() + el.sin() * pitch.cos() * roll.cos()
            - az.sin() * el.cos() * pitch.cos() * roll.sin();
        return z.clamp(-1.0, 1.0).asin().to_degrees();
    }
    elevation + cfac.elevation_corr
}

/// Angle swept by the antenna within the scan.
pub fn nav_rotation_angle(inputs: &CorrectionInputs, scan_mode: ScanMode, algorithm: Algorithm) -> f64 {
    let att = &inputs.attitude;
    let cfac = &inputs.corrections;
    match scan_mode {
        ScanMode::Air => fmod360(
            or_zero(att.rotation_angle) + cfac.rot_angle_corr + or_zero(att.roll) + cfac.roll_corr,
        ),
        ScanMode::Rhi => fmod360(450.0 - (inputs.ray.elevation + cfac.elevation_corr)),
        ScanMode::Target if inputs.radar_type != RadarType::Ground => {
            fmod360(or_zero(att.rotation_angle) + cfac.rot_angle_corr)
        }
        _ => nav_azimuth_angle(inputs, scan_mode, algorithm),
    }
}

/// Angle of the scan surface: tilt for airborne scans, the fixed
/// azimuth for RHIs (as a Cartesian angle), the elevation otherwise.
pub fn nav_tilt_angle(inputs: &CorrectionInputs, scan_mode: ScanMode, algorithm: Algorithm) -> f64 {
    let cfac = &inputs.corrections;
    match scan_mode {
        ScanMode::Air => correct_beam_angles(inputs, algorithm).tilt_deg(),
        ScanMode::Rhi => 90.0 - (inputs.ray.azimuth + cfac.azimuth_corr),
        _ => inputs.ray.elevation + cfac.elevation_corr,
    }
}

fn heading_deg(inputs: &CorrectionInputs) -> f64 {
    attitude_deg(inputs.attitude.heading, inputs.corrections.heading_corr)
}

/// Attitude angle plus its correction, or 0 when not recorded.
fn attitude_deg(value: f64, correction: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value + correction
    }
}

fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
