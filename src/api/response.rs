//! Response types for the Care Allowance Engine API.
//!
//! This module defines the successful calculation envelope, the error
//! response structures, and the mapping from engine errors to HTTP status
//! codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{RateTable, SchemeMetadata, WidgetConfig};
use crate::error::EngineError;
use crate::models::{AllowanceResult, AuditTrace, DisplayTotals};

/// Response body for a successful `/calculate` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The exact calculation result.
    pub result: AllowanceResult,
    /// Totals rounded to two decimal places.
    pub display: DisplayTotals,
    /// The steps taken and any warnings.
    pub audit_trace: AuditTrace,
    /// Time taken by the calculation in microseconds.
    pub duration_us: u64,
}

/// Response body for `GET /config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfigResponse {
    /// The resolved widget configuration, defaults merged.
    pub config: WidgetConfig,
    /// The rate table derived from the allowance seeds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_table: Option<RateTable>,
    /// Why no rate table could be derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Response body for `GET /rates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesResponse {
    /// The configured scheme.
    pub scheme: SchemeMetadata,
    /// The configured rate table.
    pub rate_table: RateTable,
}

/// API error response structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidRateTable { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_RATE_TABLE",
                    message,
                    "Every age bracket used needs a base rate and amounts must be non-negative and within the decimal range",
                ),
            },
            EngineError::InvalidInterval { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INTERVAL",
                    message,
                    "Intervals must satisfy 1 <= start <= end <= 52",
                ),
            },
            EngineError::OverlappingIntervals { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "OVERLAPPING_INTERVALS",
                    message,
                    "A dependent's intervals must not share any week",
                ),
            },
            EngineError::DuplicateDependent { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("DUPLICATE_DEPENDENT", message),
            },
        }
    }
}
