//! Partial-year proration.
//!
//! A dependent's weekly rate is paid for each week they are in care. This
//! module counts those weeks and splits the resulting annual amount into its
//! reported components.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, DependentAllowance, DependentProfile, WEEKS_PER_CYCLE, WeekInterval,
};

use super::RateResolution;

/// Counts the weeks covered by a dependent's intervals.
///
/// The count never exceeds the 52 weeks of the cycle, even for intervals that
/// skipped validation. An empty list counts zero weeks.
///
/// # Examples
///
/// ```
/// use care_allowance_engine::calculation::count_active_weeks;
/// use care_allowance_engine::models::WeekInterval;
///
/// assert_eq!(count_active_weeks(&[]), 0);
/// assert_eq!(
///     count_active_weeks(&[WeekInterval::new(1, 10), WeekInterval::new(21, 30)]),
///     20
/// );
/// ```
pub fn count_active_weeks(intervals: &[WeekInterval]) -> u32 {
    intervals
        .iter()
        .fold(0u32, |total, interval| total.saturating_add(interval.weeks()))
        .min(WEEKS_PER_CYCLE)
}

/// The result of prorating a dependent's weekly rate.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// The dependent's prorated annual breakdown.
    pub allowance: DependentAllowance,
    /// The audit step recording this proration.
    pub audit_step: AuditStep,
}

/// Prorates a resolved weekly rate over the dependent's active weeks.
///
/// Each component of the weekly rate is multiplied by the active week count,
/// so `total_allowance` is exactly `weekly_rate * active_weeks` and also the
/// sum of the reported components.
///
/// # Errors
///
/// Returns `InvalidRateTable` if a prorated amount exceeds the decimal range.
pub fn prorate_allowance(
    dependent: &DependentProfile,
    resolution: &RateResolution,
    step_number: u32,
) -> EngineResult<ProrationResult> {
    let active_weeks = count_active_weeks(&dependent.intervals);
    let weeks = Decimal::from(active_weeks);

    let prorate = |weekly: Decimal, component: &str| {
        weekly.checked_mul(weeks).ok_or_else(|| {
            EngineError::invalid_rate_table(format!(
                "{} for dependent '{}' over {} weeks exceeds the representable range",
                component, dependent.id, active_weeks
            ))
        })
    };

    let base_allowance = prorate(resolution.base_rate, "base allowance")?;
    let age_related_element = prorate(resolution.age_related_element, "age related element")?;
    let special_care_amount = prorate(resolution.special_care_addend, "special care amount")?;
    let experience_amount = prorate(resolution.experience_modifier, "experience amount")?;
    let total_allowance = prorate(resolution.weekly_rate, "total allowance")?;

    let reasoning = if active_weeks == 0 {
        format!(
            "Dependent '{}' has no weeks in care - contributes $0",
            dependent.id
        )
    } else {
        format!(
            "${} per week × {} weeks = ${}",
            resolution.weekly_rate.normalize(),
            active_weeks,
            total_allowance.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "proration".to_string(),
        rule_name: "Partial Year Proration".to_string(),
        input: serde_json::json!({
            "dependent_id": dependent.id,
            "intervals": dependent.intervals,
            "weekly_rate": resolution.weekly_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "active_weeks": active_weeks,
            "base_allowance": base_allowance.normalize().to_string(),
            "age_related_element": age_related_element.normalize().to_string(),
            "special_care_amount": special_care_amount.normalize().to_string(),
            "experience_amount": experience_amount.normalize().to_string(),
            "total_allowance": total_allowance.normalize().to_string()
        }),
        reasoning,
    };

    let allowance = DependentAllowance {
        id: dependent.id.clone(),
        age_bracket: dependent.age_bracket,
        is_special_care: dependent.is_special_care,
        active_weeks,
        weekly_rate: resolution.weekly_rate,
        base_allowance,
        age_related_element,
        special_care_amount,
        experience_amount,
        total_allowance,
    };

    Ok(ProrationResult {
        allowance,
        audit_step,
    })
}
