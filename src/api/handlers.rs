//! HTTP request handlers for the wage engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Currency;
use crate::rates::resolve_rate;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, RateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/rates/:currency", get(rate_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts raw wage input and returns the full calculation record. Rate
/// problems appear as warnings in the audit trace, never as errors.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let (raw, options) = match request.into_parts() {
        Ok(parts) => parts,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rejected conversion settings");
            return error_response(err.into());
        }
    };

    match state.calculator().calculate(&raw, &options).await {
        Ok(calc) => {
            for warning in &calc.audit_trace.warnings {
                warn!(
                    correlation_id = %correlation_id,
                    code = %warning.code,
                    message = %warning.message,
                    "Calculation warning"
                );
            }
            info!(
                correlation_id = %correlation_id,
                calculation_id = %calc.calculation_id,
                gross_salary = %calc.wage.gross_salary,
                net_salary = %calc.wage.net_salary,
                converted = calc.conversion.is_some(),
                duration_us = calc.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, calc)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /rates/{currency}.
///
/// Returns the provider's current DKK→currency rate.
async fn rate_handler(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();

    let currency: Currency = match code.parse() {
        Ok(currency) => currency,
        Err(err) => {
            warn!(correlation_id = %correlation_id, code = %code, "Unsupported currency");
            return error_response(ApiErrorResponse::from(err));
        }
    };

    match resolve_rate(state.calculator().provider(), currency, None, false).await {
        Ok(rate) => {
            info!(
                correlation_id = %correlation_id,
                currency = %currency,
                rate = %rate.rate.value(),
                "Rate lookup completed"
            );
            json_response(StatusCode::OK, RateResponse::from(rate))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rate lookup failed");
            error_response(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Calculation, RateSource};
    use crate::rates::{ExchangeRateProvider, RateTable, StaticRateProvider};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state(provider: impl ExchangeRateProvider) -> AppState {
        let config = ConfigLoader::load("./config/default")
            .expect("Failed to load config")
            .into_config();
        AppState::new(config, Arc::new(provider))
    }

    fn live() -> StaticRateProvider {
        StaticRateProvider::new(RateTable::from_quotes([
            ("DKK", dec("6.5")),
            ("EUR", dec("0.871")),
            ("BDT", dec("110.5")),
        ]))
    }

    async fn post_calculate(state: AppState, body: &str) -> Response {
        create_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let body = r#"{
            "hours_worked": 80,
            "minutes_worked": 0,
            "hourly_rate": "120",
            "personal_deduction": 5207
        }"#;

        let response = post_calculate(create_test_state(live()), body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let calc: Calculation = body_json(response).await;
        assert_eq!(calc.wage.gross_salary, dec("9600.00"));
        assert_eq!(calc.wage.total_tax, dec("2183"));
        assert_eq!(calc.wage.net_salary, dec("7417.00"));
        assert_eq!(calc.audit_trace.steps.len(), 9);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_calculate(create_test_state(live()), "{invalid json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_minutes_out_of_range_returns_400() {
        let body = r#"{"hours_worked": 37, "minutes_worked": 75, "hourly_rate": 150}"#;
        let response = post_calculate(create_test_state(live()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("minutes_worked"));
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_text_lenient_accepts() {
        let strict = r#"{"hours_worked": "abc", "hourly_rate": 150}"#;
        let response = post_calculate(create_test_state(live()), strict).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let lenient =
            r#"{"hours_worked": "abc", "hourly_rate": 150, "validation_policy": "lenient"}"#;
        let response = post_calculate(create_test_state(live()), lenient).await;
        assert_eq!(response.status(), StatusCode::OK);
        let calc: Calculation = body_json(response).await;
        assert_eq!(calc.wage.gross_salary, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_conversion_with_provider_rate() {
        let body = r#"{
            "hours_worked": 80,
            "hourly_rate": 120,
            "personal_deduction": 5207,
            "conversion": { "currency": "EUR" }
        }"#;

        let response = post_calculate(create_test_state(live()), body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let calc: Calculation = body_json(response).await;
        let conversion = calc.conversion.unwrap();
        assert_eq!(conversion.rate.source, RateSource::Provider);
        assert_eq!(conversion.converted.gross_converted, dec("1286.4"));
    }

    #[tokio::test]
    async fn test_rate_unavailable_is_warning_not_error() {
        let body = r#"{
            "hours_worked": 37,
            "minutes_worked": 30,
            "hourly_rate": 150,
            "conversion": { "currency": "BDT" }
        }"#;

        let response =
            post_calculate(create_test_state(StaticRateProvider::unavailable()), body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let calc: Calculation = body_json(response).await;
        assert!(calc.conversion.is_none());
        assert!(calc.audit_trace.has_warning("RATE_UNAVAILABLE"));
        assert_eq!(calc.wage.net_salary, dec("5175.00"));
    }

    #[tokio::test]
    async fn test_unknown_conversion_currency_returns_400() {
        let body = r#"{"hours_worked": 37, "hourly_rate": 150, "conversion": {"currency": "GBP"}}"#;
        let response = post_calculate(create_test_state(live()), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "UNSUPPORTED_CURRENCY");
    }

    async fn get_rate(state: AppState, code: &str) -> Response {
        create_router(state)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/rates/{}", code))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rate_endpoint_returns_rate() {
        let response = get_rate(create_test_state(live()), "bdt").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["base"], "DKK");
        assert_eq!(body["currency"], "BDT");
        assert_eq!(body["source"], "provider");
        assert_eq!(dec(body["rate"].as_str().unwrap()), dec("17"));
    }

    #[tokio::test]
    async fn test_rate_endpoint_unavailable_returns_502() {
        let response = get_rate(create_test_state(StaticRateProvider::unavailable()), "EUR").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "RATE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_rate_endpoint_unknown_currency_returns_400() {
        let response = get_rate(create_test_state(live()), "XYZ").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
