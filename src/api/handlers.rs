//! HTTP request handlers for the Care Allowance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_with_trace;
use crate::config::WidgetConfig;

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, RatesResponse, WidgetConfigResponse,
};
use super::state::AppState;

/// Version reported in every calculation response.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/config", get(config_handler))
        .route("/rates", get(rates_handler))
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

fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
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
    }
}

/// Handler for POST /calculate endpoint.
///
/// Calculates against the request's own rate table when one is supplied,
/// otherwise against the service's configured table.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_error(rejection, correlation_id);
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let rate_table = request
        .rate_table
        .as_ref()
        .unwrap_or_else(|| state.config().rate_table());

    let start_time = Instant::now();
    match calculate_with_trace(&request.dependents, &request.carer, Some(rate_table)) {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                dependents_count = request.dependents.len(),
                yearly_total = %outcome.result.yearly_total,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: ENGINE_VERSION.to_string(),
                display: outcome.result.display_totals(),
                result: outcome.result,
                audit_trace: outcome.audit_trace,
                duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /config endpoint.
///
/// Resolves the `config` query parameter (a JSON object) into a widget
/// configuration and derives its rate table. A missing or unparseable
/// parameter resolves to the default configuration.
async fn config_handler(Query(params): Query<HashMap<String, String>>) -> Response {
    let config = match params.get("config") {
        Some(raw) => WidgetConfig::parse_or_default(raw),
        None => WidgetConfig::default(),
    };

    match config.rate_table() {
        Ok(rate_table) => json_response(
            StatusCode::OK,
            WidgetConfigResponse {
                config,
                rate_table: Some(rate_table),
                error: None,
            },
        ),
        Err(err) => {
            warn!(error = %err, "Widget configuration has invalid allowances");
            let api_error: ApiErrorResponse = err.into();
            json_response(
                api_error.status,
                WidgetConfigResponse {
                    config,
                    rate_table: None,
                    error: Some(api_error.error),
                },
            )
        }
    }
}

/// Handler for GET /rates endpoint.
async fn rates_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_response(
        StatusCode::OK,
        RatesResponse {
            scheme: config.scheme().clone(),
            rate_table: config.rate_table().clone(),
        },
    )
}
