//! Response types for the tax engine API.
//!
//! Errors are returned as a JSON body with a machine-readable `code`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::MAX_INPUT_AMOUNT;
use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the error returned when an amount produces no computation.
    pub fn invalid_amount(field: &str) -> Self {
        Self::with_details(
            "INVALID_AMOUNT",
            format!("'{}' must be greater than zero", field),
            format!("Amounts must be positive and at most {}", MAX_INPUT_AMOUNT),
        )
    }

    /// Creates a regime not found error response.
    pub fn regime_not_found(code: &str) -> Self {
        Self::with_details(
            "REGIME_NOT_FOUND",
            format!("Tax regime not found: {}", code),
            "GET /regimes lists the available regime codes",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::RegimeNotFound { code } => {
                ApiErrorResponse::new(StatusCode::NOT_FOUND, ApiError::regime_not_found(&code))
            }
            EngineError::NoRegimeForDate { date } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new(
                    "REGIME_NOT_FOUND",
                    format!("No tax regime in force on {}", date),
                ),
            ),
            EngineError::InvalidConfig { field, message } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid '{}': {}", field, message),
                    "The deduction policy contains invalid values",
                ),
            ),
            EngineError::ConfigNotFound { path } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::ExportError { message } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_amount_error() {
        let error = ApiError::invalid_amount("ctc");
        assert_eq!(error.code, "INVALID_AMOUNT");
        assert!(error.message.contains("ctc"));
        assert!(error.details.is_some());
    }

    #[test]
    fn test_regime_not_found_maps_to_404() {
        let engine_error = EngineError::RegimeNotFound {
            code: "FY1999-00".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "REGIME_NOT_FOUND");
        assert!(api_error.error.message.contains("FY1999-00"));
    }

    #[test]
    fn test_invalid_policy_maps_to_400() {
        let engine_error = EngineError::InvalidConfig {
            field: "standard_deduction".to_string(),
            message: "must not be negative".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }
}
