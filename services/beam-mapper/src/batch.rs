//! Parallel resolution of query batches.
//!
//! Tables and projections are immutable, so every query is resolved against
//! a shared reference from the rayon pool. Output order matches input order.

use airborne_nav::{correct_beam_angles, nav_rotation_angle, nav_tilt_angle, CorrectionInputs};
use projection::ProjectionCalc;
use rayon::prelude::*;
use scan_table::ScanTable;
use tracing::debug;

use crate::config::NavConfig;
use crate::records::{BeamRecord, GridRecord, NavRecord, PlatformRecord};

/// Look up the beam for each (elevation, azimuth) pair.
pub fn resolve_beams(table: &ScanTable, queries: &[(f64, f64)]) -> Vec<BeamRecord> {
    let records: Vec<BeamRecord> = queries
        .par_iter()
        .map(|&(elevation, azimuth)| {
            let elev_index = table.angle_to_elev_index(elevation);
            let az_index = elev_index
                .and_then(|i| table.elev(i))
                .and_then(|sweep| table.angle_to_az_index(sweep, azimuth));
            BeamRecord {
                elevation,
                azimuth,
                elev_index,
                az_index,
                beam_num: table.angles_to_beam_num(elevation, azimuth),
            }
        })
        .collect();

    let hits = records.iter().filter(|r| r.beam_num.is_some()).count();
    debug!(queries = queries.len(), hits, "Resolved beam batch");
    records
}

/// Place each (lat, lon) point on the projected grid.
pub fn resolve_grid(calc: &ProjectionCalc, points: &[(f64, f64)]) -> Vec<GridRecord> {
    let records: Vec<GridRecord> = points
        .par_iter()
        .map(|&(lat, lon)| {
            let (x, y) = calc.latlon_to_xy(lat, lon);
            let index = calc.latlon_to_xy_index(lat, lon);
            GridRecord {
                lat,
                lon,
                x,
                y,
                ix: index.map(|(ix, _)| ix),
                iy: index.map(|(_, iy)| iy),
                array_index: index.and_then(|(ix, iy)| calc.xy_index_to_array_index(ix, iy, 0)),
            }
        })
        .collect();

    let inside = records.iter().filter(|r| r.array_index.is_some()).count();
    debug!(
        points = points.len(),
        inside,
        proj_type = %calc.proj_type(),
        "Resolved grid batch"
    );
    records
}

/// Correct each platform record with the configured algorithm.
pub fn correct_batch(records: &[PlatformRecord], nav: &NavConfig) -> Vec<NavRecord> {
    let corrected: Vec<NavRecord> = records
        .par_iter()
        .map(|record| {
            let inputs = CorrectionInputs {
                attitude: record.attitude,
                corrections: nav.corrections,
                radar_type: nav.radar_type,
                ray: record.ray,
            };
            let beam = correct_beam_angles(&inputs, nav.algorithm);
            NavRecord::new(
                &beam,
                nav_rotation_angle(&inputs, nav.scan_mode, nav.algorithm),
                nav_tilt_angle(&inputs, nav.scan_mode, nav.algorithm),
            )
        })
        .collect();

    debug!(records = records.len(), algorithm = ?nav.algorithm, "Corrected nav batch");
    corrected
}
