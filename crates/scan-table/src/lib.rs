//! Radar scan table: maps a beam's (elevation, azimuth) to its slot in a
//! volume scan.
//!
//! A scan table lists the elevations of a volume scan and, for each
//! elevation, the azimuths at which beams are expected. Bucket limits are
//! derived halfway between neighbouring angles, and lookups classify an
//! observed angle into the bucket that contains it.

pub mod angle_index;
pub mod parser;
pub mod table;

pub use angle_index::angle_index;
pub use parser::parse_scan_table;
pub use table::{BeamLocation, ScanTable, ScanTableAz, ScanTableElev, SweepDef};
