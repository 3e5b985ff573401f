//! Common test fixtures for radar geometry tests.
//!
//! This module provides pre-defined scan tables and reference locations
//! that represent common scenarios in radar data processing.

use std::io::Write;
use tempfile::NamedTempFile;

/// Scan table text fixtures.
pub mod tables {
    use std::fmt::Write;

    /// Three elevations with irregular azimuth spacing and comments.
    pub const SMALL_IRREGULAR: &str = "\
# small irregular table
# used by parser and lookup tests
nelevations 3

elevation 0.5
nazimuths 4
0.0
90.0
180.0
270.0

# second sweep is denser in the north
elevation 1.5
nazimuths 6
-20.0
-10.0
0.0
10.0
20.0
180.0

elevation 3.0
nazimuths 2
45.0
225.0
";

    /// Table text with one block per elevation and uniformly spaced azimuths
    /// starting at 0.
    pub fn uniform_table_text(elevations: &[f64], naz: usize) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "# uniform table, {} azimuths per sweep", naz);
        let _ = writeln!(text, "nelevations {}", elevations.len());
        let step = 360.0 / naz as f64;
        for elev in elevations {
            let _ = writeln!(text, "elevation {}", elev);
            let _ = writeln!(text, "nazimuths {}", naz);
            for i in 0..naz {
                let _ = writeln!(text, "{}", i as f64 * step);
            }
        }
        text
    }

    /// Two sweeps (0.5 and 1.5 deg), 360 azimuths each at 1 deg spacing.
    pub fn two_elevation_text() -> String {
        uniform_table_text(&[0.5, 1.5], 360)
    }

    /// NEXRAD VCP 21 style elevations.
    pub const VCP21_ELEVATIONS: [f64; 9] = [0.5, 1.45, 2.4, 3.35, 4.3, 6.0, 9.9, 14.6, 19.5];
}

/// Reference radar and grid origins (lat, lon in degrees).
pub mod origins {
    /// Boulder, CO (a mid-latitude Northern Hemisphere site)
    pub const BOULDER: (f64, f64) = (40.015, -105.27);

    /// Darwin, Australia (a Southern Hemisphere site)
    pub const DARWIN: (f64, f64) = (-12.46, 130.84);

    /// Point just east of the antimeridian
    pub const FIJI: (f64, f64) = (-17.75, 178.4);

    /// High latitude site
    pub const SVALBARD: (f64, f64) = (78.22, 15.65);
}

/// Write text into a temporary file and return its handle.
///
/// The file is deleted when the handle is dropped.
pub fn write_temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file.flush().expect("failed to flush temp file");
    file
}
