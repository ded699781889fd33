//! The allowance calculation entry points.
//!
//! A calculation validates the rate table and every dependent before computing
//! anything, so a request either produces a complete result or a single error.

use crate::config::RateTable;
use crate::error::EngineResult;
use crate::models::{
    AllowanceResult, AuditTrace, AuditWarning, CarerContext, DependentAllowance,
    DependentProfile,
};

use super::aggregation::aggregate_allowances;
use super::proration::prorate_allowance;
use super::rate_resolution::resolve_weekly_rate;
use super::validation::validate_dependents;

/// A calculation result together with the audit trace that produced it.
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    /// The computed allowances.
    pub result: AllowanceResult,
    /// Every step taken, plus warnings.
    pub audit_trace: AuditTrace,
}

/// Calculates the allowance for a set of dependents.
///
/// When `rate_table` is `None` the built-in default table is used.
///
/// # Errors
///
/// Returns `InvalidRateTable`, `InvalidInterval`, `OverlappingIntervals` or
/// `DuplicateDependent`. No partial result is ever returned.
///
/// # Examples
///
/// ```
/// use care_allowance_engine::calculation::calculate;
/// use care_allowance_engine::models::{AgeBracket, CarerContext, DependentProfile};
/// use rust_decimal::Decimal;
///
/// let dependents = vec![DependentProfile::full_year("child_1", AgeBracket::Age0To4)];
/// let result = calculate(&dependents, &CarerContext::new_carer(), None)?;
///
/// assert_eq!(result.yearly_total, Decimal::from(5200));
/// assert_eq!(result.weekly_total, Decimal::from(100));
/// # Ok::<(), care_allowance_engine::error::EngineError>(())
/// ```
pub fn calculate(
    dependents: &[DependentProfile],
    carer: &CarerContext,
    rate_table: Option<&RateTable>,
) -> EngineResult<AllowanceResult> {
    calculate_with_trace(dependents, carer, rate_table).map(|outcome| outcome.result)
}

/// Calculates the allowance and records each step in an [`AuditTrace`].
///
/// Steps are numbered from 1: a rate resolution and a proration step per
/// dependent in request order, then one aggregation step.
pub fn calculate_with_trace(
    dependents: &[DependentProfile],
    carer: &CarerContext,
    rate_table: Option<&RateTable>,
) -> EngineResult<CalculationOutcome> {
    let default_table;
    let rate_table = match rate_table {
        Some(table) => table,
        None => {
            default_table = RateTable::default();
            &default_table
        }
    };

    rate_table.validate()?;
    validate_dependents(dependents)?;

    let mut audit_trace = AuditTrace::default();
    let mut per_dependent: Vec<DependentAllowance> = Vec::with_capacity(dependents.len());
    let mut step_number: u32 = 1;

    for dependent in dependents {
        let resolution = resolve_weekly_rate(dependent, carer, rate_table, step_number)?;
        audit_trace.steps.push(resolution.audit_step.clone());
        step_number += 1;

        let proration = prorate_allowance(dependent, &resolution, step_number)?;
        audit_trace.steps.push(proration.audit_step);
        step_number += 1;

        if !dependent.is_in_care() {
            audit_trace.warnings.push(AuditWarning {
                code: "DEPENDENT_NOT_IN_CARE".to_string(),
                message: format!(
                    "Dependent '{}' has no care intervals and contributes nothing",
                    dependent.id
                ),
                severity: "low".to_string(),
            });
        }

        per_dependent.push(proration.allowance);
    }

    let aggregation = aggregate_allowances(per_dependent, step_number)?;
    audit_trace.steps.push(aggregation.audit_step);

    Ok(CalculationOutcome {
        result: aggregation.result,
        audit_trace,
    })
}
