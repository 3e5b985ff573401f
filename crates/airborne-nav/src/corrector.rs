//! Attitude correction of airborne radar beam angles.
//!
//! Both formulations describe the beam by a unit vector in an earth frame
//! with x east of track, y along track and z up, then rotate by the track
//! (heading plus drift) to get the true azimuth.

use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use tracing::warn;

use crate::types::{Algorithm, BeamAngles, CorrectionInputs};

/// Correct one beam for aircraft attitude.
///
/// Recorded angles that are NaN count as zero, and their correction
/// offset is not applied.
pub fn correct_beam_angles(inputs: &CorrectionInputs, algorithm: Algorithm) -> BeamAngles {
    match algorithm {
        Algorithm::Lee => lee(inputs),
        Algorithm::Testud => testud(inputs),
    }
}

/// Recorded angle plus its correction, in radians, or 0 when not recorded.
fn corrected_rad(value: f64, correction: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        (value + correction).to_radians()
    }
}

/// Wrap into `[0, 2pi)`.
fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

fn lee(inputs: &CorrectionInputs) -> BeamAngles {
    let att = &inputs.attitude;
    let cfac = &inputs.corrections;

    let roll = corrected_rad(att.roll, cfac.roll_corr);
    let pitch = corrected_rad(att.pitch, cfac.pitch_corr);
    let heading = corrected_rad(att.heading, cfac.heading_corr);
    let drift = corrected_rad(att.drift_angle, cfac.drift_corr);
    let track = heading + drift;

    let (sin_p, cos_p) = pitch.sin_cos();
    let (sin_d, cos_d) = drift.sin_cos();

    let beam = if inputs.radar_type.is_fixed_antenna() {
        // ray azimuth is measured clockwise from the nose; use the
        // counterclockwise-from-right angle
        let lambda = if inputs.ray.azimuth.is_nan() {
            0.0
        } else {
            (90.0 - (inputs.ray.azimuth + cfac.azimuth_corr)).to_radians()
        };
        let phi = corrected_rad(inputs.ray.elevation, cfac.elevation_corr);
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_r, cos_r) = roll.sin_cos();

        Vector3::new(
            cos_lambda * cos_phi * (cos_d * cos_r - sin_d * sin_p * sin_r)
                - sin_d * cos_p * sin_lambda * cos_phi
                + sin_phi * (cos_d * sin_r + sin_d * sin_p * cos_r),
            cos_lambda * cos_phi * (sin_d * cos_r + cos_d * sin_p * sin_r)
                + cos_d * cos_p * sin_lambda * cos_phi
                + sin_phi * (sin_d * sin_r - cos_d * sin_p * cos_r),
            -cos_p * sin_r * cos_lambda * cos_phi
                + sin_p * sin_lambda * cos_phi
                + cos_p * cos_r * sin_phi,
        )
    } else {
        let theta_a = corrected_rad(att.rotation_angle, cfac.rot_angle_corr);
        let tau_a = corrected_rad(att.tilt, cfac.tilt_corr);
        let (sin_tau, cos_tau) = tau_a.sin_cos();
        // roll corrected rotation angle
        let (sin_rc, cos_rc) = (theta_a + roll).sin_cos();

        Vector3::new(
            cos_rc * sin_d * cos_tau * sin_p + cos_d * sin_rc * cos_tau - sin_d * cos_p * sin_tau,
            -cos_rc * cos_d * cos_tau * sin_p + sin_d * sin_rc * cos_tau + cos_p * cos_d * sin_tau,
            cos_p * cos_tau * cos_rc + sin_p * sin_tau,
        )
    };

    BeamAngles {
        x: beam.x,
        y: beam.y,
        z: beam.z,
        rotation_angle: beam.x.atan2(beam.z),
        tilt: beam.y.clamp(-1.0, 1.0).asin(),
        azimuth: wrap_two_pi(beam.x.atan2(beam.y) + track),
        elevation: beam.z.clamp(-1.0, 1.0).asin(),
        psi: None,
    }
}

fn testud(inputs: &CorrectionInputs) -> BeamAngles {
    let att = &inputs.attitude;
    let cfac = &inputs.corrections;

    let pitch = corrected_rad(att.pitch, cfac.pitch_corr);
    let heading = corrected_rad(att.heading, cfac.heading_corr);
    let drift = corrected_rad(att.drift_angle, cfac.drift_corr);
    let track = heading + drift;

    let rotation = wrap_two_pi(
        corrected_rad(att.rotation_angle, cfac.rot_angle_corr)
            + corrected_rad(att.roll, cfac.roll_corr),
    );
    let tilt = corrected_rad(att.tilt, cfac.tilt_corr);
    let phi = rotation + PI;

    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let (sin_tilt, cos_tilt) = tilt.sin_cos();
    let (sin_drift, cos_drift) = drift.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let cos_psi = cos_pitch * cos_drift * sin_tilt + sin_pitch * cos_drift * cos_tilt * cos_phi
        - sin_drift * cos_tilt * sin_phi;
    let psi = cos_psi.clamp(-1.0, 1.0).acos();

    let sin_el = (sin_tilt * sin_pitch - cos_tilt * cos_pitch * cos_phi).clamp(-1.0, 1.0);
    let elevation = sin_el.asin();
    let cos_el = elevation.cos();
    let cos_az = (sin_tilt - sin_pitch * sin_el) / (cos_pitch * cos_el);

    let mut az = azimuth_from_cos(cos_az);
    if rotation >= PI {
        az = TAU - az;
    }
    az -= drift;

    // acos loses the quadrant; restore the component signs from az
    let (sin_az, cos_az) = az.sin_cos();
    let mut beam = Vector3::new(sin_az * cos_el, cos_az * cos_el, sin_el);
    beam.z = if elevation >= 0.0 { beam.z.abs() } else { -beam.z.abs() };
    if (0.0..=FRAC_PI_2).contains(&az) {
        beam.x = beam.x.abs();
        beam.y = beam.y.abs();
    } else if az > FRAC_PI_2 && az <= PI {
        beam.x = beam.x.abs();
        beam.y = -beam.y.abs();
    } else if az > PI && az <= PI + FRAC_PI_2 {
        beam.x = -beam.x.abs();
        beam.y = -beam.y.abs();
    } else if az > PI + FRAC_PI_2 && az < TAU {
        beam.x = -beam.x.abs();
        beam.y = beam.y.abs();
    }

    BeamAngles {
        x: beam.x,
        y: beam.y,
        z: beam.z,
        rotation_angle: beam.x.atan2(beam.z),
        tilt: beam.y.atan2(beam.x.hypot(beam.z)),
        azimuth: wrap_two_pi(az + track),
        elevation,
        psi: Some(psi),
    }
}

/// Azimuth from its cosine, clamping values pushed outside [-1, 1].
pub(crate) fn azimuth_from_cos(cos_az: f64) -> f64 {
    if cos_az.abs() <= 1.0 {
        cos_az.acos()
    } else {
        warn!(cos_az, "Beam azimuth cosine out of range, clamping");
        if cos_az > 1.0 {
            0.0
        } else {
            PI
        }
    }
}
