//! Calculation logic for the Care Allowance Engine.
//!
//! This module contains the calculation steps for determining a carer's
//! allowance: input validation, weekly rate resolution per dependent,
//! partial-year proration, and aggregation into weekly, monthly and yearly
//! totals. [`calculate`] and [`calculate_with_trace`] run them in order.

mod aggregation;
mod engine;
mod proration;
mod rate_resolution;
mod validation;

pub use aggregation::{AggregationResult, MONTHS_PER_YEAR, aggregate_allowances};
pub use engine::{CalculationOutcome, calculate, calculate_with_trace};
pub use proration::{ProrationResult, count_active_weeks, prorate_allowance};
pub use rate_resolution::{RateResolution, resolve_weekly_rate};
pub use validation::{validate_dependents, validate_interval, validate_intervals};
