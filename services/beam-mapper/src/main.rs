//! Beam mapper command line service.
//!
//! Resolves batches of radar beams, grid points and airborne beam angles.
//! Input is read from `--input` or stdin; results are written to stdout as
//! one JSON record per line. Logs go to stderr.

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use beam_mapper::{
    correct_batch, load_config, parse_pairs, parse_platform_records, resolve_beams, resolve_grid,
    resolve_scan_table,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "beam-mapper")]
#[command(about = "Map radar beams, grid points and airborne beam angles")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "BEAM_MAPPER_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up beam numbers for "elevation azimuth" pairs
    Beams {
        /// Scan table file
        #[arg(long, env = "BEAM_MAPPER_TABLE")]
        table: Option<PathBuf>,

        /// Config file whose scan_table section is used when --table is absent
        #[arg(short, long, env = "BEAM_MAPPER_CONFIG")]
        config: Option<PathBuf>,

        /// Extend the lowest elevation bucket down to -10 degrees
        #[arg(long)]
        extend_below: bool,

        /// Query file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Place "lat lon" pairs on the configured projection grid
    Grid {
        /// Config file with a projection section
        #[arg(short, long, env = "BEAM_MAPPER_CONFIG")]
        config: PathBuf,

        /// Point file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print a scan table summary
    Table {
        /// Scan table file
        #[arg(long, env = "BEAM_MAPPER_TABLE")]
        table: Option<PathBuf>,

        /// Config file whose scan_table section is used when --table is absent
        #[arg(short, long, env = "BEAM_MAPPER_CONFIG")]
        config: Option<PathBuf>,

        #[arg(long)]
        extend_below: bool,
    },

    /// Correct JSON-lines platform records for aircraft attitude
    Nav {
        /// Config file; the nav section is optional
        #[arg(short, long, env = "BEAM_MAPPER_CONFIG")]
        config: PathBuf,

        /// Record file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_tracing(&args.log_level, args.log_json);

    match args.command {
        Command::Beams {
            table,
            config,
            extend_below,
            input,
        } => {
            let table = resolve_scan_table(table.as_deref(), config.as_deref(), extend_below)?;
            let queries = parse_pairs(&read_input(input.as_deref())?)?;
            info!(queries = queries.len(), beams = table.nbeams_vol(), "Resolving beams");
            write_json_lines(&resolve_beams(&table, &queries))
        }
        Command::Grid { config, input } => {
            let config = load_config(&config)?;
            let calc = config.build_projection()?;
            let points = parse_pairs(&read_input(input.as_deref())?)?;
            info!(points = points.len(), proj_type = %calc.proj_type(), "Resolving grid points");
            write_json_lines(&resolve_grid(&calc, &points))
        }
        Command::Table {
            table,
            config,
            extend_below,
        } => {
            let table = resolve_scan_table(table.as_deref(), config.as_deref(), extend_below)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write!(out, "{}", table)?;
            out.flush()?;
            Ok(())
        }
        Command::Nav { config, input } => {
            let config = load_config(&config)?;
            let records = parse_platform_records(&read_input(input.as_deref())?)?;
            info!(
                records = records.len(),
                algorithm = ?config.nav.algorithm,
                scan_mode = ?config.nav.scan_mode,
                "Correcting beam angles"
            );
            write_json_lines(&correct_batch(&records, &config.nav))
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read input from {:?}", path))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_json_lines<T: Serialize>(records: &[T]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
