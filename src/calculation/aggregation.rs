//! Request-level aggregation.
//!
//! The yearly total is the sum of every dependent's prorated annual amount.
//! Weekly and monthly figures average that total over the whole cycle rather
//! than summing each dependent's weekly rate, so dependents in care for only
//! part of the year are not overstated.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllowanceResult, AuditStep, DependentAllowance, WEEKS_PER_CYCLE};

/// Number of months the yearly total is spread over.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The result of aggregating per-dependent allowances, including the audit step.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// The complete allowance result.
    pub result: AllowanceResult,
    /// The audit step recording the aggregation.
    pub audit_step: AuditStep,
}

/// Sums per-dependent allowances into weekly, monthly and yearly totals.
///
/// ```text
/// yearly_total  = Σ total_allowance
/// weekly_total  = yearly_total / 52
/// monthly_total = yearly_total / 12
/// ```
///
/// Totals are exact; nothing is rounded here.
///
/// # Errors
///
/// Returns `InvalidRateTable` if the yearly sum exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use care_allowance_engine::calculation::aggregate_allowances;
///
/// let aggregation = aggregate_allowances(vec![], 1)?;
/// assert!(aggregation.result.yearly_total.is_zero());
/// assert!(aggregation.result.weekly_total.is_zero());
/// # Ok::<(), care_allowance_engine::error::EngineError>(())
/// ```
pub fn aggregate_allowances(
    per_dependent: Vec<DependentAllowance>,
    step_number: u32,
) -> EngineResult<AggregationResult> {
    let yearly_total = per_dependent
        .iter()
        .try_fold(Decimal::ZERO, |total, d| total.checked_add(d.total_allowance))
        .ok_or_else(|| {
            EngineError::invalid_rate_table("yearly total exceeds the representable range")
        })?;
    let weekly_total = yearly_total / Decimal::from(WEEKS_PER_CYCLE);
    let monthly_total = yearly_total / Decimal::from(MONTHS_PER_YEAR);

    let audit_step = AuditStep {
        step_number,
        rule_id: "aggregation".to_string(),
        rule_name: "Periodic Totals".to_string(),
        input: serde_json::json!({
            "dependent_count": per_dependent.len(),
            "dependent_totals": per_dependent
                .iter()
                .map(|d| serde_json::json!({
                    "id": d.id,
                    "total_allowance": d.total_allowance.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "yearly_total": yearly_total.normalize().to_string(),
            "monthly_total": monthly_total.normalize().to_string(),
            "weekly_total": weekly_total.normalize().to_string()
        }),
        reasoning: format!(
            "{} dependents total ${} per year; ${} / {} weeks = ${} per week; ${} / {} months = ${} per month",
            per_dependent.len(),
            yearly_total.normalize(),
            yearly_total.normalize(),
            WEEKS_PER_CYCLE,
            weekly_total.normalize(),
            yearly_total.normalize(),
            MONTHS_PER_YEAR,
            monthly_total.normalize()
        ),
    };

    Ok(AggregationResult {
        result: AllowanceResult {
            per_dependent,
            weekly_total,
            monthly_total,
            yearly_total,
        },
        audit_step,
    })
}
