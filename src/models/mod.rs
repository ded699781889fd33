//! Core data models for the Care Allowance Engine.
//!
//! This module contains the domain types used throughout the engine:
//! dependents and their care intervals, the carer context, and the
//! calculation results.

mod age_bracket;
mod allowance_result;
mod dependent;

pub use age_bracket::{AgeBracket, ParseAgeBracketError};
pub use allowance_result::{
    AllowanceResult, AuditStep, AuditTrace, AuditWarning, DISPLAY_DECIMAL_PLACES,
    DependentAllowance, DisplayTotals, round_for_display,
};
pub use dependent::{CarerContext, DependentProfile, WEEKS_PER_CYCLE, WeekInterval};
