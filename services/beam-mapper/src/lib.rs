//! Batch resolution of radar beams, grid cells and airborne beam angles.
//!
//! The `beam-mapper` binary wraps these functions; they are exposed as a
//! library so the pipeline can be tested without spawning processes.

pub mod batch;
pub mod config;
pub mod records;

pub use batch::{correct_batch, resolve_beams, resolve_grid};
pub use config::{load_config, resolve_scan_table, MapperConfig, NavConfig, ScanTableConfig};
pub use records::{parse_pairs, parse_platform_records, BeamRecord, GridRecord, NavRecord, PlatformRecord};
