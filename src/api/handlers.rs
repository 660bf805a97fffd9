//! HTTP request handlers for the tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{SalaryBreakdownCalculator, SlabTaxCalculator};
use crate::export::{salary_export_rows, tax_export_rows, to_csv_string};
use crate::models::{SalaryBreakdown, TaxResult};

use super::request::{SalaryRequest, TaxRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tax", post(tax_handler))
        .route("/tax/export", post(tax_export_handler))
        .route("/salary", post(salary_handler))
        .route("/salary/export", post(salary_export_handler))
        .route("/regimes", get(regimes_handler))
        .with_state(state)
}

/// Handler for POST /tax.
async fn tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax request");

    match parse_payload(payload, correlation_id).and_then(|r| run_tax(&state, r, correlation_id))
    {
        Ok(result) => json_response(StatusCode::OK, &result),
        Err(error) => error_response(error),
    }
}

/// Handler for POST /tax/export.
async fn tax_export_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax export request");

    let csv = parse_payload(payload, correlation_id)
        .and_then(|r| run_tax(&state, r, correlation_id))
        .and_then(|result| {
            to_csv_string(tax_export_rows(&result)).map_err(ApiErrorResponse::from)
        });

    match csv {
        Ok(body) => csv_response(body, "tax-details.csv"),
        Err(error) => error_response(error),
    }
}

/// Handler for POST /salary.
async fn salary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary request");

    match parse_payload(payload, correlation_id)
        .and_then(|r| run_salary(&state, r, correlation_id))
    {
        Ok(breakdown) => json_response(StatusCode::OK, &breakdown),
        Err(error) => error_response(error),
    }
}

/// Handler for POST /salary/export.
async fn salary_export_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary export request");

    let csv = parse_payload(payload, correlation_id)
        .and_then(|r| run_salary(&state, r, correlation_id))
        .and_then(|breakdown| {
            to_csv_string(salary_export_rows(&breakdown)).map_err(ApiErrorResponse::from)
        });

    match csv {
        Ok(body) => csv_response(body, "salary-breakdown.csv"),
        Err(error) => error_response(error),
    }
}

/// Handler for GET /regimes.
async fn regimes_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, &state.config().metadata())
}

fn run_tax(
    state: &AppState,
    request: TaxRequest,
    correlation_id: Uuid,
) -> Result<TaxResult, ApiErrorResponse> {
    let regime = state.regime(request.regime.as_deref()).inspect_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Regime lookup failed");
    })?;

    let mut calculator = SlabTaxCalculator::new(regime);
    if let Some(policy) = request.deduction_policy {
        policy.validate()?;
        calculator = calculator.with_policy(policy);
    }

    let start_time = Instant::now();
    let Some(result) = calculator.compute(request.amount) else {
        warn!(
            correlation_id = %correlation_id,
            amount = %request.amount,
            "Amount produced no computation"
        );
        return Err(ApiErrorResponse::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::invalid_amount("amount"),
        ));
    };

    info!(
        correlation_id = %correlation_id,
        regime = %result.regime_code,
        total_tax = %result.total_tax,
        duration_us = start_time.elapsed().as_micros(),
        "Tax calculation completed"
    );
    Ok(result)
}

fn run_salary(
    state: &AppState,
    request: SalaryRequest,
    correlation_id: Uuid,
) -> Result<SalaryBreakdown, ApiErrorResponse> {
    let regime = state.regime(request.regime.as_deref()).inspect_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Regime lookup failed");
    })?;

    let start_time = Instant::now();
    let Some(breakdown) = SalaryBreakdownCalculator::new(regime).compute(request.ctc) else {
        warn!(
            correlation_id = %correlation_id,
            ctc = %request.ctc,
            "CTC produced no computation"
        );
        return Err(ApiErrorResponse::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::invalid_amount("ctc"),
        ));
    };

    info!(
        correlation_id = %correlation_id,
        regime = %breakdown.regime_code,
        net_annual = %breakdown.net_annual,
        duration_us = start_time.elapsed().as_micros(),
        "Salary calculation completed"
    );
    Ok(breakdown)
}

/// Maps a JSON extraction failure to a 400 response.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error))
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn csv_response(body: String, filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, &error.error)
}
