//! Integration tests for scan table loading and beam lookup.

use std::sync::Arc;
use std::thread;

use radar_common::RadarError;
use rand::Rng;
use scan_table::{angle_index, ScanTable, SweepDef};
use test_utils::{require_test_file, seeded_rng, tables, write_temp_file};

fn two_elevation_table() -> ScanTable {
    ScanTable::parse(&tables::two_elevation_text(), false).unwrap()
}

// ============================================================================
// Reference scenario: two sweeps of 360 one-degree beams
// ============================================================================

#[test]
fn test_two_elevation_geometry() {
    let table = two_elevation_table();
    assert_eq!(table.nelevations(), 2);
    assert_eq!(table.max_azimuths(), 360);
    assert_eq!(table.nbeams_vol(), 720);
    assert_eq!(table.elev_limits(), &[0.0, 1.0, 2.0]);

    let second = table.elev(1).unwrap();
    assert_eq!(second.start_beam_num(), 360);
    assert_eq!(second.az_reference(), -0.5);
    assert_eq!(second.rel_az_limits()[0], 0.0);
    assert_eq!(second.rel_az_limits()[360], 360.0);
}

#[test]
fn test_two_elevation_lookups() {
    let table = two_elevation_table();

    // nearest to the 0 deg beam of the first sweep
    assert_eq!(table.angles_to_beam_num(0.5, 0.4), Some(0));
    // last beam of the second sweep
    assert_eq!(table.angles_to_beam_num(1.5, 359.4), Some(719));
    // past the 359 bucket the angle wraps into the 0 deg bucket
    assert_eq!(table.angles_to_beam_num(1.5, 359.6), Some(360));
    assert_eq!(table.angles_to_beam_num(1.5, -0.4), Some(360));
    // elevation outside the table
    assert_eq!(table.angles_to_beam_num(5.0, 0.0), None);
}

#[test]
fn test_every_configured_beam_round_trips() {
    let table = ScanTable::parse(tables::SMALL_IRREGULAR, false).unwrap();

    for elev in table.elevations() {
        for az in elev.azs() {
            assert_eq!(
                table.angles_to_beam_num(elev.angle(), az.angle),
                Some(az.beam_num),
                "elev {} az {}",
                elev.angle(),
                az.angle
            );
            let loc = table.beam_location(az.beam_num).unwrap();
            assert_eq!(loc.elevation, elev.angle());
            assert_eq!(loc.azimuth, az.angle);
        }
    }
}

#[test]
fn test_elevation_misses() {
    let table = ScanTable::parse(tables::SMALL_IRREGULAR, false).unwrap();
    let limits = table.elev_limits().to_vec();
    let n = table.nelevations();

    assert_eq!(table.angle_to_elev_index(limits[0] - 0.01), None);
    assert_eq!(table.angle_to_elev_index(limits[n]), None);
    assert_eq!(table.angle_to_elev_index(limits[n] + 10.0), None);
    assert_eq!(table.angle_to_elev_index(limits[0]), Some(0));
    assert_eq!(table.angles_to_beam_num(-5.0, 0.0), None);
}

#[test]
fn test_extend_below_catches_low_elevations() {
    let table = ScanTable::parse(tables::SMALL_IRREGULAR, true).unwrap();
    assert_eq!(table.elev_limits()[0], -10.0);
    assert_eq!(table.ext_elev_angles()[0], -10.0);
    assert_eq!(table.angles_to_beam_num(-5.0, 0.0), Some(0));
    assert_eq!(table.angles_to_beam_num(-10.5, 0.0), None);
}

#[test]
fn test_irregular_sweep_buckets() {
    let table = ScanTable::parse(tables::SMALL_IRREGULAR, false).unwrap();

    // second sweep: -20 -10 0 10 20 180, beams 4..=9
    assert_eq!(table.angles_to_beam_num(1.5, 344.0), Some(4));
    assert_eq!(table.angles_to_beam_num(1.5, -14.0), Some(5));
    assert_eq!(table.angles_to_beam_num(1.5, 4.9), Some(6));
    assert_eq!(table.angles_to_beam_num(1.5, 5.0), Some(7));
    assert_eq!(table.angles_to_beam_num(1.5, 99.0), Some(8));
    assert_eq!(table.angles_to_beam_num(1.5, 100.0), Some(9));
    assert_eq!(table.angles_to_beam_num(1.5, 259.0), Some(9));
    // bucket coverage ends at 260 and restarts at 335
    assert_eq!(table.angles_to_beam_num(1.5, 300.0), None);

    // third sweep: two opposite beams cover the full circle
    assert_eq!(table.angles_to_beam_num(3.0, 0.0), Some(10));
    assert_eq!(table.angles_to_beam_num(3.0, 180.0), Some(11));
}

#[test]
fn test_wraparound_idempotence() {
    let table = two_elevation_table();
    let mut rng = seeded_rng(11);

    for _ in 0..500 {
        // keep clear of bucket boundaries at x.5
        let az = rng.gen_range(0..360) as f64 + rng.gen_range(-0.4..0.4);
        let expected = table.angles_to_beam_num(0.5, az);
        assert!(expected.is_some());
        for k in [-3.0, -1.0, 1.0, 5.0] {
            assert_eq!(table.angles_to_beam_num(0.5, az + 360.0 * k), expected);
        }
    }
}

#[test]
fn test_angle_index_matches_linear_scan() {
    let mut rng = seeded_rng(5);
    let mut limits = vec![0.0];
    for _ in 0..50 {
        let next = limits[limits.len() - 1] + rng.gen_range(0.1..12.0);
        limits.push(next);
    }
    let top = limits[limits.len() - 1];

    for _ in 0..1000 {
        let angle = rng.gen_range(0.0..top);
        let expected = (0..limits.len() - 1).find(|&i| limits[i] <= angle && angle < limits[i + 1]);
        assert_eq!(angle_index(angle, &limits, 0.0), expected);
    }
}

// ============================================================================
// File handling
// ============================================================================

#[test]
fn test_from_file() {
    let file = write_temp_file(tables::SMALL_IRREGULAR);
    let table = ScanTable::from_file(file.path(), false).unwrap();
    assert_eq!(table.nelevations(), 3);
    assert_eq!(table.nbeams_vol(), 12);
    assert_eq!(table.max_azimuths(), 6);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ScanTable::from_file("/nonexistent/scan.table", false).unwrap_err();
    assert!(matches!(err, RadarError::Io(_)));
}

#[test]
fn test_unsorted_file_rejected() {
    let text = "nelevations 1\nelevation 0.5\nnazimuths 3\n10\n5\n20\n";
    let file = write_temp_file(text);
    let err = ScanTable::from_file(file.path(), false).unwrap_err();
    assert!(matches!(err, RadarError::NonMonotonic { .. }));
}

#[test]
fn test_write_then_parse() {
    let table = ScanTable::parse(tables::SMALL_IRREGULAR, false).unwrap();
    let mut buf = Vec::new();
    table.write_to(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(ScanTable::parse(&text, false).unwrap(), table);
}

#[test]
fn test_bundled_vcp21_table() {
    let path = require_test_file!("vcp21.table");
    let table = ScanTable::from_file(path, false).unwrap();
    assert_eq!(table.nelevations(), tables::VCP21_ELEVATIONS.len());
    assert_eq!(table.elev_angles(), &tables::VCP21_ELEVATIONS);
    assert_eq!(table.nbeams_vol(), 9 * 360);
    assert_eq!(table.angles_to_beam_num(19.5, 10.2), Some(8 * 360 + 10));
    assert_eq!(table.angles_to_beam_num(1.0, 90.0), Some(360 + 90));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_lookup_across_threads() {
    let table = Arc::new(two_elevation_table());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for az in 0..360 {
                    let beam = table.angles_to_beam_num(1.5, az as f64 + 0.1 * t as f64);
                    assert_eq!(beam, Some(360 + az));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_in_memory_construction_matches_parsed() {
    let azimuths: Vec<f64> = (0..360).map(|i| i as f64).collect();
    let built = ScanTable::new(
        vec![
            SweepDef::new(0.5, azimuths.clone()),
            SweepDef::new(1.5, azimuths),
        ],
        false,
    )
    .unwrap();
    assert_eq!(built, two_elevation_table());
}
