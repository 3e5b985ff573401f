//! Input parsing and output records for the batch commands.

use airborne_nav::{BeamAngles, PlatformAttitude, RayAngles};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Parse whitespace separated number pairs, one pair per line.
///
/// Blank lines and lines starting with `#` are skipped. `inf` and `NaN`
/// are rejected.
pub fn parse_pairs(text: &str) -> Result<Vec<(f64, f64)>> {
    let mut pairs = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            bail!("line {}: expected 2 values, found {}", line_no, tokens.len());
        }
        let first: f64 = tokens[0]
            .parse()
            .with_context(|| format!("line {}: invalid number {:?}", line_no, tokens[0]))?;
        let second: f64 = tokens[1]
            .parse()
            .with_context(|| format!("line {}: invalid number {:?}", line_no, tokens[1]))?;
        if !first.is_finite() || !second.is_finite() {
            bail!("line {}: values must be finite", line_no);
        }
        pairs.push((first, second));
    }
    Ok(pairs)
}

/// One line of `nav` input: aircraft attitude plus the recorded ray angles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    #[serde(flatten)]
    pub attitude: PlatformAttitude,
    #[serde(default)]
    pub ray: RayAngles,
}

/// Parse JSON-lines platform records. Blank lines are skipped.
pub fn parse_platform_records(text: &str) -> Result<Vec<PlatformRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("line {}: invalid platform record", index + 1))
        })
        .collect()
}

/// Beam lookup result for one (elevation, azimuth) query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamRecord {
    pub elevation: f64,
    pub azimuth: f64,
    pub elev_index: Option<usize>,
    pub az_index: Option<usize>,
    pub beam_num: Option<usize>,
}

/// Grid placement of one (lat, lon) point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    pub lat: f64,
    pub lon: f64,
    pub x: f64,
    pub y: f64,
    pub ix: Option<usize>,
    pub iy: Option<usize>,
    pub array_index: Option<usize>,
}

/// Corrected beam pointing, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavRecord {
    pub azimuth: f64,
    pub elevation: f64,
    pub rotation_angle: f64,
    pub tilt: f64,
    pub psi: Option<f64>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Rotation angle as reported for the configured scan mode
    pub nav_rotation: f64,
    /// Tilt as reported for the configured scan mode
    pub nav_tilt: f64,
}

impl NavRecord {
    pub fn new(beam: &BeamAngles, nav_rotation: f64, nav_tilt: f64) -> Self {
        Self {
            azimuth: beam.azimuth_deg(),
            elevation: beam.elevation_deg(),
            rotation_angle: beam.rotation_angle_deg(),
            tilt: beam.tilt_deg(),
            psi: beam.psi_deg(),
            x: beam.x,
            y: beam.y,
            z: beam.z,
            nav_rotation,
            nav_tilt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let text = "# elev az\n0.5 0.4\n\n  1.5\t359.4  \n";
        let pairs = parse_pairs(text).unwrap();
        assert_eq!(pairs, vec![(0.5, 0.4), (1.5, 359.4)]);
    }

    #[test]
    fn test_parse_pairs_reports_line() {
        let err = parse_pairs("0.5 0.4\n1.5\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);

        let err = parse_pairs("0.5 north\n").unwrap_err();
        assert!(err.to_string().contains("line 1"), "{}", err);
    }

    #[test]
    fn test_parse_pairs_rejects_non_finite() {
        for text in ["40.0 inf\n", "1.0 2.0\n-inf 0\n", "NaN 10\n"] {
            let err = parse_pairs(text).unwrap_err();
            assert!(err.to_string().contains("finite"), "{}", err);
        }
        assert_eq!(parse_pairs("1e20 -1e20\n").unwrap(), vec![(1e20, -1e20)]);
    }

    #[test]
    fn test_parse_platform_records() {
        let text = r#"{"roll": 1.0, "heading": 90.0, "rotation_angle": 45.0}

{"pitch": -2.0, "ray": {"azimuth": 10.0, "elevation": 3.0}}
"#;
        let records = parse_platform_records(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].attitude.heading, 90.0);
        assert_eq!(records[0].attitude.tilt, 0.0);
        assert_eq!(records[1].attitude.pitch, -2.0);
        assert_eq!(records[1].ray.elevation, 3.0);
    }

    #[test]
    fn test_parse_platform_records_error() {
        let err = parse_platform_records("{\"roll\": 1.0}\nnot json\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_beam_record_serializes_miss_as_null() {
        let record = BeamRecord {
            elevation: 5.0,
            azimuth: 0.0,
            elev_index: None,
            az_index: None,
            beam_num: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"beam_num\":null"), "{}", json);
    }
}
