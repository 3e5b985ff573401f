//! Scan table geometry and beam lookup.

use std::fmt;
use std::io::Write;

use radar_common::{RadarError, RadarResult};
use tracing::{debug, warn};

use crate::angle_index::angle_index;

/// Lower elevation limit used when the lowest bucket is extended downward.
pub const EXTEND_BELOW_LIMIT: f64 = -10.0;

/// Half-width (deg) of the elevation bucket in a single-elevation table.
pub const SINGLE_ELEV_HALF_WIDTH: f64 = 0.5;

/// One sweep as supplied to [`ScanTable::new`]: an elevation angle and the
/// azimuths at which beams are expected, in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDef {
    pub elevation: f64,
    pub azimuths: Vec<f64>,
}

impl SweepDef {
    pub fn new(elevation: f64, azimuths: Vec<f64>) -> Self {
        Self {
            elevation,
            azimuths,
        }
    }
}

/// A single expected beam position within a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanTableAz {
    /// Azimuth angle (deg)
    pub angle: f64,
    /// Beam number within the volume
    pub beam_num: usize,
}

/// Where a beam number sits in the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamLocation {
    pub elev_index: usize,
    pub az_index: usize,
    pub elevation: f64,
    pub azimuth: f64,
}

/// One elevation of the scan table with its azimuth buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTableElev {
    angle: f64,
    start_beam_num: usize,
    end_beam_num: usize,
    az_reference: f64,
    azs: Vec<ScanTableAz>,
    rel_az_limits: Vec<f64>,
}

impl ScanTableElev {
    fn new(elev_index: usize, angle: f64, azimuths: &[f64], start_beam_num: usize) -> RadarResult<Self> {
        if azimuths.is_empty() {
            return Err(RadarError::EmptyTable(format!(
                "elevation {} ({} deg) has no azimuths",
                elev_index, angle
            )));
        }
        check_increasing(azimuths, &format!("azimuths of elevation {}", elev_index))?;

        let (az_reference, rel_az_limits) = compute_az_limits(azimuths);
        let span = rel_az_limits[rel_az_limits.len() - 1];
        if span > 360.0 + radar_common::TINY_ANGLE {
            warn!(
                elev_index,
                span, "azimuth buckets cover more than 360 deg, beams past one turn are unreachable"
            );
        }

        let azs = azimuths
            .iter()
            .enumerate()
            .map(|(i, &az)| ScanTableAz {
                angle: az,
                beam_num: start_beam_num + i,
            })
            .collect();

        Ok(Self {
            angle,
            start_beam_num,
            end_beam_num: start_beam_num + azimuths.len() - 1,
            az_reference,
            azs,
            rel_az_limits,
        })
    }

    /// Elevation angle (deg).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Number of azimuths in this sweep.
    pub fn naz(&self) -> usize {
        self.azs.len()
    }

    pub fn start_beam_num(&self) -> usize {
        self.start_beam_num
    }

    pub fn end_beam_num(&self) -> usize {
        self.end_beam_num
    }

    /// Lower azimuth limit of the sweep, the zero point of `rel_az_limits`.
    pub fn az_reference(&self) -> f64 {
        self.az_reference
    }

    pub fn azs(&self) -> &[ScanTableAz] {
        &self.azs
    }

    /// Azimuth bucket limits relative to [`ScanTableElev::az_reference`].
    pub fn rel_az_limits(&self) -> &[f64] {
        &self.rel_az_limits
    }

    /// Index of the azimuth bucket containing `az`, if any.
    pub fn angle_to_az_index(&self, az: f64) -> Option<usize> {
        angle_index(az, &self.rel_az_limits, self.az_reference)
    }
}

/// Scan geometry of a radar volume.
///
/// Immutable once built; lookups take `&self` and may be shared across
/// threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTable {
    extend_below: bool,
    elev_angles: Vec<f64>,
    elev_limits: Vec<f64>,
    ext_elev_angles: Vec<f64>,
    elevs: Vec<ScanTableElev>,
    nbeams_vol: usize,
    max_azimuths: usize,
}

impl ScanTable {
    /// Build a table from sweeps listed in scan order.
    ///
    /// Beam numbers are assigned sequentially, sweep by sweep. When
    /// `extend_below` is set the lowest elevation bucket reaches down to
    /// [`EXTEND_BELOW_LIMIT`].
    ///
    /// Elevations, and the azimuths within each sweep, must be strictly
    /// increasing; the table is rejected rather than silently reordered.
    pub fn new(sweeps: Vec<SweepDef>, extend_below: bool) -> RadarResult<Self> {
        if sweeps.is_empty() {
            return Err(RadarError::EmptyTable("no elevations".to_string()));
        }

        let elev_angles: Vec<f64> = sweeps.iter().map(|s| s.elevation).collect();
        check_increasing(&elev_angles, "elevation angles")?;

        let elev_limits = compute_elev_limits(&elev_angles, extend_below);
        let ext_elev_angles = compute_ext_elev_angles(&elev_angles, &elev_limits, extend_below);

        let mut elevs = Vec::with_capacity(sweeps.len());
        let mut next_beam = 0;
        for (i, sweep) in sweeps.iter().enumerate() {
            let elev = ScanTableElev::new(i, sweep.elevation, &sweep.azimuths, next_beam)?;
            next_beam = elev.end_beam_num + 1;
            elevs.push(elev);
        }

        let max_azimuths = elevs.iter().map(|e| e.naz()).max().unwrap_or(0);

        debug!(
            nelevations = elevs.len(),
            nbeams_vol = next_beam,
            max_azimuths,
            extend_below,
            "Built scan table"
        );

        Ok(Self {
            extend_below,
            elev_angles,
            elev_limits,
            ext_elev_angles,
            elevs,
            nbeams_vol: next_beam,
            max_azimuths,
        })
    }

    pub fn nelevations(&self) -> usize {
        self.elevs.len()
    }

    /// Largest azimuth count over all elevations.
    pub fn max_azimuths(&self) -> usize {
        self.max_azimuths
    }

    /// Total beams in the volume.
    pub fn nbeams_vol(&self) -> usize {
        self.nbeams_vol
    }

    pub fn extend_below(&self) -> bool {
        self.extend_below
    }

    pub fn elev_angles(&self) -> &[f64] {
        &self.elev_angles
    }

    /// Elevation bucket limits, `nelevations + 1` entries.
    pub fn elev_limits(&self) -> &[f64] {
        &self.elev_limits
    }

    /// Elevations padded with an extrapolated angle below and above.
    pub fn ext_elev_angles(&self) -> &[f64] {
        &self.ext_elev_angles
    }

    pub fn elevations(&self) -> &[ScanTableElev] {
        &self.elevs
    }

    pub fn elev(&self, index: usize) -> Option<&ScanTableElev> {
        self.elevs.get(index)
    }

    /// Index of the elevation bucket containing `elev`, if any.
    pub fn angle_to_elev_index(&self, elev: f64) -> Option<usize> {
        angle_index(elev, &self.elev_limits, 0.0)
    }

    /// Index of the azimuth bucket of `elev` containing `az`, if any.
    pub fn angle_to_az_index(&self, elev: &ScanTableElev, az: f64) -> Option<usize> {
        elev.angle_to_az_index(az)
    }

    /// Beam number for an observed (elevation, azimuth), or `None` when the
    /// angles fall outside the table's coverage.
    pub fn angles_to_beam_num(&self, elev: f64, az: f64) -> Option<usize> {
        let elev_index = self.angle_to_elev_index(elev)?;
        let sweep = &self.elevs[elev_index];
        let az_index = sweep.angle_to_az_index(az)?;
        Some(sweep.azs[az_index].beam_num)
    }

    /// Inverse of [`ScanTable::angles_to_beam_num`].
    pub fn beam_location(&self, beam_num: usize) -> Option<BeamLocation> {
        if beam_num >= self.nbeams_vol {
            return None;
        }
        let elev_index = self
            .elevs
            .partition_point(|e| e.start_beam_num <= beam_num)
            .checked_sub(1)?;
        let sweep = &self.elevs[elev_index];
        let az_index = beam_num - sweep.start_beam_num;
        let az = sweep.azs.get(az_index)?;
        Some(BeamLocation {
            elev_index,
            az_index,
            elevation: sweep.angle,
            azimuth: az.angle,
        })
    }

    /// Write the table in the scan table text format.
    pub fn write_to<W: Write>(&self, mut writer: W) -> RadarResult<()> {
        writeln!(writer, "# scan table, {} beams per volume", self.nbeams_vol)?;
        writeln!(writer, "nelevations {}", self.elevs.len())?;
        for elev in &self.elevs {
            writeln!(writer)?;
            writeln!(writer, "elevation {}", elev.angle)?;
            writeln!(writer, "nazimuths {}", elev.naz())?;
            for az in &elev.azs {
                writeln!(writer, "{}", az.angle)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ScanTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scan table")?;
        writeln!(f, "  nelevations:  {}", self.nelevations())?;
        writeln!(f, "  max azimuths: {}", self.max_azimuths)?;
        writeln!(f, "  nbeams_vol:   {}", self.nbeams_vol)?;
        writeln!(f, "  extend below: {}", self.extend_below)?;
        let ext: Vec<String> = self
            .ext_elev_angles
            .iter()
            .map(|a| format!("{:.2}", a))
            .collect();
        writeln!(f, "  ext elev angles: {}", ext.join(" "))?;

        for (i, elev) in self.elevs.iter().enumerate() {
            writeln!(
                f,
                "  Elevation {}: angle {:.2}, limits [{:.2}, {:.2}), naz {}, beams {}-{}, az reference {:.2}",
                i,
                elev.angle,
                self.elev_limits[i],
                self.elev_limits[i + 1],
                elev.naz(),
                elev.start_beam_num,
                elev.end_beam_num,
                elev.az_reference
            )?;
            for (j, az) in elev.azs.iter().enumerate() {
                writeln!(
                    f,
                    "    az {:4}: angle {:7.2}, beam {:5}, rel limits [{:.2}, {:.2})",
                    j,
                    az.angle,
                    az.beam_num,
                    elev.rel_az_limits[j],
                    elev.rel_az_limits[j + 1]
                )?;
            }
        }
        Ok(())
    }
}

/// Elevation bucket limits: midpoints between elevations, extrapolated by
/// half a gap at each end (or [`EXTEND_BELOW_LIMIT`] at the bottom).
pub fn compute_elev_limits(elev_angles: &[f64], extend_below: bool) -> Vec<f64> {
    let n = elev_angles.len();
    if n == 0 {
        return Vec::new();
    }

    let mut limits = Vec::with_capacity(n + 1);

    let (bottom_half_gap, top_half_gap) = if n == 1 {
        (SINGLE_ELEV_HALF_WIDTH, SINGLE_ELEV_HALF_WIDTH)
    } else {
        (
            (elev_angles[1] - elev_angles[0]) / 2.0,
            (elev_angles[n - 1] - elev_angles[n - 2]) / 2.0,
        )
    };

    if extend_below {
        limits.push(EXTEND_BELOW_LIMIT);
    } else {
        limits.push(elev_angles[0] - bottom_half_gap);
    }
    for pair in elev_angles.windows(2) {
        limits.push((pair[0] + pair[1]) / 2.0);
    }
    limits.push(elev_angles[n - 1] + top_half_gap);

    limits
}

/// Elevations padded with one extrapolated angle at each end.
pub fn compute_ext_elev_angles(
    elev_angles: &[f64],
    elev_limits: &[f64],
    extend_below: bool,
) -> Vec<f64> {
    let n = elev_angles.len();
    if n == 0 || elev_limits.len() != n + 1 {
        return Vec::new();
    }

    let mut ext = Vec::with_capacity(n + 2);
    if extend_below {
        ext.push(EXTEND_BELOW_LIMIT);
    } else {
        ext.push(elev_angles[0] - 2.0 * (elev_angles[0] - elev_limits[0]));
    }
    ext.extend_from_slice(elev_angles);
    ext.push(elev_angles[n - 1] + 2.0 * (elev_limits[n] - elev_angles[n - 1]));
    ext
}

/// Azimuth bucket limits for one sweep.
///
/// Returns the lower limit of the sweep and the `m + 1` limits expressed
/// relative to it. A single azimuth gets a bucket spanning the full circle.
pub fn compute_az_limits(azimuths: &[f64]) -> (f64, Vec<f64>) {
    let m = azimuths.len();
    if m == 0 {
        return (0.0, Vec::new());
    }

    let (bottom, top) = if m == 1 {
        (azimuths[0] - 180.0, azimuths[0] + 180.0)
    } else {
        (
            azimuths[0] - (azimuths[1] - azimuths[0]) / 2.0,
            azimuths[m - 1] + (azimuths[m - 1] - azimuths[m - 2]) / 2.0,
        )
    };

    let mut limits = Vec::with_capacity(m + 1);
    limits.push(0.0);
    for pair in azimuths.windows(2) {
        limits.push((pair[0] + pair[1]) / 2.0 - bottom);
    }
    limits.push(top - bottom);

    (bottom, limits)
}

fn check_increasing(values: &[f64], context: &str) -> RadarResult<()> {
    for pair in values.windows(2) {
        if !(pair[1] > pair[0]) {
            return Err(RadarError::NonMonotonic {
                context: context.to_string(),
                previous: pair[0],
                value: pair[1],
            });
        }
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(RadarError::NonMonotonic {
            context: context.to_string(),
            previous: *bad,
            value: *bad,
        });
    }
    Ok(())
}
