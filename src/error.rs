//! Error types for the tax engine.
//!
//! Computation never fails: invalid input simply produces no result. The
//! errors here cover everything around the computation, such as loading and
//! validating regime configuration and writing exports.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the tax engine.
///
/// # Example
///
/// ```
/// use tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/fy2025-26.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/fy2025-26.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A regime configuration violated one of its invariants.
    #[error("Invalid regime configuration '{field}': {message}")]
    InvalidConfig {
        /// The offending field (e.g. "slabs[3].rate").
        field: String,
        /// A description of the violation.
        message: String,
    },

    /// No regime matched the requested code.
    #[error("Tax regime not found: {code}")]
    RegimeNotFound {
        /// The regime code that was requested.
        code: String,
    },

    /// No regime was in force on the requested date.
    #[error("No tax regime in force on {date}")]
    NoRegimeForDate {
        /// The date for which a regime was requested.
        date: NaiveDate,
    },

    /// Writing an export failed.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        EngineError::ExportError {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
