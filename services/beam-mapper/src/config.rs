//! Configuration loader for beam-mapper.
//!
//! A single YAML file describes the scan table, the output grid projection
//! and the airborne navigation settings. Every section is optional; each
//! subcommand requires only the section it uses.
//!
//! Supports environment variable substitution using ${VAR} and
//! ${VAR:-default} syntax.

use std::fs;
use std::path::{Path, PathBuf};

use airborne_nav::{Algorithm, CorrectionFactors, RadarType, ScanMode};
use anyhow::{Context, Result};
use projection::{ProjectionCalc, ProjectionParams};
use scan_table::ScanTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapperConfig {
    #[serde(default)]
    pub scan_table: Option<ScanTableConfig>,
    #[serde(default)]
    pub projection: Option<ProjectionParams>,
    #[serde(default)]
    pub nav: NavConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanTableConfig {
    /// Table file; relative paths are resolved against the config file
    pub path: PathBuf,
    /// Extend the lowest elevation bucket down to -10 degrees
    #[serde(default)]
    pub extend_below: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub algorithm: Algorithm,
    pub scan_mode: ScanMode,
    pub radar_type: RadarType,
    pub corrections: CorrectionFactors,
}

impl MapperConfig {
    /// Load the configured scan table.
    pub fn load_scan_table(&self) -> Result<ScanTable> {
        let table_config = self
            .scan_table
            .as_ref()
            .context("Config has no scan_table section")?;
        load_table_file(&table_config.path, table_config.extend_below)
    }

    /// Build the configured projection.
    pub fn build_projection(&self) -> Result<ProjectionCalc> {
        let params = self
            .projection
            .as_ref()
            .context("Config has no projection section")?;
        ProjectionCalc::from_params(params)
            .with_context(|| format!("Invalid {} projection", params.proj_type))
    }
}

// ============================================================================
// Loading Functions
// ============================================================================

/// Load and parse a config file with environment variable substitution.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MapperConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;

    let expanded = expand_env_vars(&content)?;

    let mut config: MapperConfig = serde_yaml::from_str(&expanded)
        .with_context(|| format!("Failed to parse config from {:?}", path))?;

    if let Some(table) = config.scan_table.as_mut() {
        if table.path.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            table.path = base.join(&table.path);
        }
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load the scan table named on the command line, or else the one in the
/// config file. `extend_below` on the command line also applies to a
/// configured table.
pub fn resolve_scan_table(
    table: Option<&Path>,
    config: Option<&Path>,
    extend_below: bool,
) -> Result<ScanTable> {
    match (table, config) {
        (Some(path), _) => load_table_file(path, extend_below),
        (None, Some(config_path)) => {
            let mut config = load_config(config_path)?;
            if let Some(table_config) = config.scan_table.as_mut() {
                table_config.extend_below |= extend_below;
            }
            config.load_scan_table()
        }
        (None, None) => anyhow::bail!("No scan table given; use --table or --config"),
    }
}

fn load_table_file(path: &Path, extend_below: bool) -> Result<ScanTable> {
    ScanTable::from_file(path, extend_below)
        .with_context(|| format!("Failed to load scan table from {:?}", path))
}

fn validate_config(config: &MapperConfig) -> Result<()> {
    if config.projection.is_some() {
        config.build_projection()?;
    }
    Ok(())
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in YAML content
/// Supports ${VAR} and ${VAR:-default} syntax
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::new();
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).with_context(|| format!("Environment variable {} not set", expr))
    }
}
