//! HTTP API module for the Care Allowance Engine.
//!
//! This module provides the REST API endpoints for calculating allowances
//! and inspecting the configured rates.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ENGINE_VERSION, create_router};
pub use request::CalculationRequest;
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, RatesResponse, WidgetConfigResponse,
};
pub use state::AppState;
