//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading versioned
//! tax regimes from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{RegimeMetadata, TaxRegimeConfig};

/// Loads and provides access to tax regime configurations.
///
/// # Directory Structure
///
/// ```text
/// config/regimes/
/// ├── fy2024-25.yaml
/// └── fy2025-26.yaml
/// ```
///
/// Each file holds one complete [`TaxRegimeConfig`].
///
/// # Example
///
/// ```no_run
/// use tax_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/regimes").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let regime = loader.regime_for(date).unwrap();
/// println!("Regime in force: {}", regime.metadata.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Regimes sorted by `effective_from`, oldest first.
    regimes: Vec<TaxRegimeConfig>,
}

impl ConfigLoader {
    /// Loads every regime file from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The directory is missing or contains no `.yaml` files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any regime fails [`TaxRegimeConfig::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut regimes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let regime = Self::load_regime(&path)?;
                debug!(
                    code = %regime.code(),
                    path = %path.display(),
                    "Loaded tax regime"
                );
                regimes.push(regime);
            }
        }

        if regimes.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no regime files found)", dir_str),
            });
        }

        Ok(Self::from_regimes(regimes))
    }

    /// Builds a loader from already-constructed regimes.
    pub fn from_regimes(mut regimes: Vec<TaxRegimeConfig>) -> Self {
        regimes.sort_by(|a, b| a.metadata.effective_from.cmp(&b.metadata.effective_from));
        Self { regimes }
    }

    /// Loads, parses and validates a single regime file.
    pub fn load_regime(path: &Path) -> EngineResult<TaxRegimeConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let regime: TaxRegimeConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        regime.validate()?;
        Ok(regime)
    }

    /// Returns all loaded regimes, oldest first.
    pub fn regimes(&self) -> &[TaxRegimeConfig] {
        &self.regimes
    }

    /// Returns metadata for all loaded regimes, oldest first.
    pub fn metadata(&self) -> Vec<&RegimeMetadata> {
        self.regimes.iter().map(|r| &r.metadata).collect()
    }

    /// Gets a regime by its code (case-insensitive).
    pub fn get(&self, code: &str) -> EngineResult<&TaxRegimeConfig> {
        self.regimes
            .iter()
            .find(|r| r.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| EngineError::RegimeNotFound {
                code: code.to_string(),
            })
    }

    /// Gets the regime in force on `date`.
    ///
    /// Picks the most recent regime whose `effective_from` is on or before
    /// the date and which has not expired by then.
    pub fn regime_for(&self, date: NaiveDate) -> EngineResult<&TaxRegimeConfig> {
        self.regimes
            .iter()
            .rev()
            .find(|r| r.is_effective_on(date))
            .ok_or(EngineError::NoRegimeForDate { date })
    }

    /// Returns the most recently effective regime.
    pub fn latest(&self) -> Option<&TaxRegimeConfig> {
        self.regimes.last()
    }
}
