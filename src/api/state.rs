//! Application state for the tax engine API.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::{ConfigLoader, TaxRegimeConfig};
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Holds the loaded regimes; cloning only bumps the reference count.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Resolves the regime for a request.
    ///
    /// An explicit code must exist. Without one, the regime in force on
    /// `today` is used, falling back to the latest loaded regime.
    pub fn resolve_regime(
        &self,
        code: Option<&str>,
        today: NaiveDate,
    ) -> EngineResult<&TaxRegimeConfig> {
        if let Some(code) = code {
            return self.config.get(code);
        }
        self.config
            .regime_for(today)
            .or_else(|_| self.config.latest().ok_or(EngineError::NoRegimeForDate { date: today }))
    }

    /// Resolves the regime for a request made now.
    pub fn regime(&self, code: Option<&str>) -> EngineResult<&TaxRegimeConfig> {
        self.resolve_regime(code, Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_state() -> AppState {
        AppState::new(ConfigLoader::from_regimes(vec![TaxRegimeConfig::fy2025_26()]))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_explicit_code_resolves() {
        let state = create_state();
        let regime = state.resolve_regime(Some("fy2025-26"), date("2020-01-01")).unwrap();
        assert_eq!(regime.code(), "FY2025-26");
    }

    #[test]
    fn test_unknown_code_is_error() {
        let state = create_state();
        match state.resolve_regime(Some("FY1999-00"), date("2025-06-01")) {
            Err(EngineError::RegimeNotFound { code }) => assert_eq!(code, "FY1999-00"),
            other => panic!("Expected RegimeNotFound, got {:?}", other.map(|r| r.code())),
        }
    }

    #[test]
    fn test_falls_back_to_latest_outside_any_regime() {
        let state = create_state();
        let regime = state.resolve_regime(None, date("2030-01-01")).unwrap();
        assert_eq!(regime.code(), "FY2025-26");
    }

    #[test]
    fn test_empty_loader_has_no_regime() {
        let state = AppState::new(ConfigLoader::from_regimes(Vec::new()));
        assert!(state.resolve_regime(None, date("2025-06-01")).is_err());
    }
}
