//! Integration tests for airborne beam angle correction.

use std::f64::consts::{FRAC_PI_2, TAU};

use airborne_nav::{
    correct_beam_angles, nav_rotation_angle, nav_tilt_angle, Algorithm, BeamAngles,
    CorrectionFactors, CorrectionInputs, PlatformAttitude, RadarType, RayAngles, ScanMode,
};
use test_utils::{assert_angle_approx_eq, assert_approx_eq, attitude_samples};

fn tail_inputs(sample: [f64; 6]) -> CorrectionInputs {
    let [roll, pitch, heading, drift_angle, rotation_angle, tilt] = sample;
    CorrectionInputs {
        attitude: PlatformAttitude {
            roll,
            pitch,
            heading,
            drift_angle,
            rotation_angle,
            tilt,
        },
        radar_type: RadarType::AirTail,
        ..Default::default()
    }
}

fn assert_well_formed(beam: &BeamAngles) {
    assert!(beam.x.is_finite() && beam.y.is_finite() && beam.z.is_finite());
    assert_approx_eq!(beam.unit_vector().norm(), 1.0, 1e-9);
    assert!((0.0..TAU).contains(&beam.azimuth), "azimuth {}", beam.azimuth);
    assert!(beam.elevation.abs() <= FRAC_PI_2);
    assert!(beam.rotation_angle.is_finite() && beam.tilt.is_finite());
}

#[test]
fn test_outputs_are_well_formed() {
    for sample in attitude_samples(500, 3) {
        let inputs = tail_inputs(sample);
        for algorithm in [Algorithm::Lee, Algorithm::Testud] {
            assert_well_formed(&correct_beam_angles(&inputs, algorithm));
        }
        let psi = correct_beam_angles(&inputs, Algorithm::Testud).psi.unwrap();
        assert!((0.0..=std::f64::consts::PI).contains(&psi));
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    for sample in attitude_samples(100, 9) {
        let inputs = tail_inputs(sample);
        for algorithm in [Algorithm::Lee, Algorithm::Testud] {
            let first = correct_beam_angles(&inputs, algorithm);
            let second = correct_beam_angles(&inputs, algorithm);
            assert_eq!(first, second);
            assert_eq!(first.azimuth.to_bits(), second.azimuth.to_bits());
        }
    }
}

#[test]
fn test_nan_attitude_counts_as_zero() {
    let corrections = CorrectionFactors {
        roll_corr: 1.5,
        pitch_corr: -0.7,
        heading_corr: 2.0,
        drift_corr: 0.3,
        rot_angle_corr: -1.1,
        tilt_corr: 0.4,
        ..Default::default()
    };
    let nan_inputs = CorrectionInputs {
        attitude: PlatformAttitude {
            roll: f64::NAN,
            pitch: f64::NAN,
            heading: f64::NAN,
            drift_angle: f64::NAN,
            rotation_angle: 120.0,
            tilt: 15.0,
        },
        corrections,
        radar_type: RadarType::AirTail,
        ..Default::default()
    };
    // missing values drop their corrections too
    let zero_inputs = CorrectionInputs {
        attitude: PlatformAttitude {
            roll: 0.0,
            pitch: 0.0,
            heading: 0.0,
            drift_angle: 0.0,
            rotation_angle: 120.0,
            tilt: 15.0,
        },
        corrections: CorrectionFactors {
            rot_angle_corr: -1.1,
            tilt_corr: 0.4,
            ..Default::default()
        },
        radar_type: RadarType::AirTail,
        ..Default::default()
    };

    for algorithm in [Algorithm::Lee, Algorithm::Testud] {
        let from_nan = correct_beam_angles(&nan_inputs, algorithm);
        assert_well_formed(&from_nan);
        assert_eq!(from_nan, correct_beam_angles(&zero_inputs, algorithm));
    }
}

#[test]
fn test_formulations_agree_in_level_flight() {
    // with zero pitch both formulations reduce to the same rotation
    let mut checked = 0;
    for sample in attitude_samples(400, 21) {
        let [roll, _, heading, drift, rotation, tilt] = sample;
        // keep clear of the vertical, where acos loses precision
        if (rotation + roll).to_radians().sin().abs() < 0.35 {
            continue;
        }
        let inputs = tail_inputs([roll, 0.0, heading, drift, rotation, tilt]);
        let lee = correct_beam_angles(&inputs, Algorithm::Lee);
        let testud = correct_beam_angles(&inputs, Algorithm::Testud);

        assert_angle_approx_eq!(lee.azimuth_deg(), testud.azimuth_deg(), 1e-7);
        assert_approx_eq!(lee.elevation, testud.elevation, 1e-9);
        assert_approx_eq!(lee.tilt, testud.tilt, 1e-9);
        assert_approx_eq!(lee.rotation_angle, testud.rotation_angle, 1e-9);
        assert_approx_eq!(lee.x, testud.x, 1e-9);
        assert_approx_eq!(lee.y, testud.y, 1e-9);
        assert_approx_eq!(lee.z, testud.z, 1e-9);
        checked += 1;
    }
    assert!(checked > 100);
}

#[test]
fn test_heading_only_turns_azimuth() {
    let base = tail_inputs([3.0, 2.0, 0.0, 4.0, 75.0, -10.0]);
    for algorithm in [Algorithm::Lee, Algorithm::Testud] {
        let north = correct_beam_angles(&base, algorithm);
        let mut turned = base;
        turned.attitude.heading = 130.0;
        let east = correct_beam_angles(&turned, algorithm);

        assert_angle_approx_eq!(east.azimuth_deg(), north.azimuth_deg() + 130.0, 1e-9);
        assert_approx_eq!(east.elevation, north.elevation, 1e-12);
    }
}

#[test]
fn test_tilted_beam_points_forward() {
    // 20 degrees fore tilt on a right-pointing beam
    let inputs = tail_inputs([0.0, 0.0, 0.0, 0.0, 90.0, 20.0]);
    for algorithm in [Algorithm::Lee, Algorithm::Testud] {
        let beam = correct_beam_angles(&inputs, algorithm);
        assert_approx_eq!(beam.azimuth_deg(), 70.0, 1e-9);
        assert_approx_eq!(beam.elevation_deg(), 0.0, 1e-9);
        assert_approx_eq!(beam.tilt_deg(), 20.0, 1e-9);
    }
}

#[test]
fn test_fixed_antenna_uses_ray_angles() {
    let inputs = CorrectionInputs {
        attitude: PlatformAttitude {
            heading: 250.0,
            // ignored by fixed antennas
            rotation_angle: 90.0,
            ..Default::default()
        },
        radar_type: RadarType::AirNose,
        ray: RayAngles {
            azimuth: 0.0,
            elevation: 5.0,
        },
        ..Default::default()
    };
    let beam = correct_beam_angles(&inputs, Algorithm::Lee);
    assert_approx_eq!(beam.azimuth_deg(), 250.0, 1e-9);
    assert_approx_eq!(beam.elevation_deg(), 5.0, 1e-9);
    assert!(beam.psi.is_none());
}

#[test]
fn test_nav_angles_for_air_scans() {
    let inputs = tail_inputs([1.0, 0.0, 0.0, 0.0, 89.0, 20.0]);
    let rotation = nav_rotation_angle(&inputs, ScanMode::Air, Algorithm::Testud);
    assert_approx_eq!(rotation, 90.0, 1e-9);
    let tilt = nav_tilt_angle(&inputs, ScanMode::Air, Algorithm::Testud);
    assert_approx_eq!(tilt, 20.0, 1e-9);
}
