//! Error types for the radar geometry crates.
//!
//! Lookups that simply miss (an angle outside the scan, a point outside the
//! grid) are not errors; they return `None`. This type covers the failures a
//! caller must not ignore.

use thiserror::Error;

/// Result type alias using RadarError.
pub type RadarResult<T> = Result<T, RadarError>;

/// Primary error type for radar geometry operations.
#[derive(Debug, Error)]
pub enum RadarError {
    // === Input Errors ===
    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    #[error("Values not monotonic in {context}: {value} follows {previous}")]
    NonMonotonic {
        context: String,
        previous: f64,
        value: f64,
    },

    #[error("Empty table: {0}")]
    EmptyTable(String),

    // === Configuration Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RadarError {
    /// Shorthand for a parse failure at a given line.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        RadarError::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// Shorthand for a rejected configuration value.
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        RadarError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}
