//! Response types for the wage engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::ResolvedRate;

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    message,
                    format!("Check the value supplied for '{}'", field),
                ),
            },
            EngineError::UnsupportedCurrency { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNSUPPORTED_CURRENCY",
                    message,
                    "Supported currencies are DKK, USD, EUR and BDT",
                ),
            },
            EngineError::InvalidManualRate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_MANUAL_RATE", message),
            },
            EngineError::RateUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::new("RATE_UNAVAILABLE", message),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
        }
    }
}

/// Response body for `GET /rates/{currency}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResponse {
    /// Always "DKK".
    pub base: String,
    /// The resolved rate.
    #[serde(flatten)]
    pub rate: ResolvedRate,
}

impl From<ResolvedRate> for RateResponse {
    fn from(rate: ResolvedRate) -> Self {
        Self {
            base: "DKK".to_string(),
            rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_input("minutes_worked", "must be between 0 and 59").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INPUT");
        assert!(api_error.error.message.contains("minutes_worked"));
    }

    #[test]
    fn test_rate_unavailable_maps_to_bad_gateway() {
        let api_error: ApiErrorResponse = EngineError::RateUnavailable {
            currency: "EUR".to_string(),
            message: "timeout".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api_error.error.code, "RATE_UNAVAILABLE");
    }

    #[test]
    fn test_manual_rate_and_config_errors() {
        let api_error: ApiErrorResponse =
            EngineError::InvalidManualRate { rate: Decimal::ZERO }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);

        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            message: "tiers".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
