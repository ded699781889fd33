//! Weekly rate resolution.
//!
//! This module determines a dependent's full-year weekly rate from the rate
//! table. Adjustments stack additively so each one stays visible in the
//! per-dependent breakdown.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CarerContext, DependentProfile};

/// The result of resolving a dependent's weekly rate, with each component
/// kept separately.
#[derive(Debug, Clone)]
pub struct RateResolution {
    /// Base weekly rate for the dependent's age bracket.
    pub base_rate: Decimal,
    /// Bracket step-up on top of the base rate (zero for a flat table).
    pub age_related_element: Decimal,
    /// Special-care addend, zero if the dependent has no special care needs.
    pub special_care_addend: Decimal,
    /// Experienced-carer modifier, zero if the carer does not qualify.
    pub experience_modifier: Decimal,
    /// Sum of all the components above.
    pub weekly_rate: Decimal,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves a dependent's full-year weekly rate.
///
/// ```text
/// weekly_rate = base_rates[age_bracket]
///             + age_related_elements[age_bracket]
///             + (is_special_care ? special_care_addend : 0)
///             + (carer.is_experienced ? experienced_carer_modifier : 0)
/// ```
///
/// # Errors
///
/// Returns `InvalidRateTable` if the dependent's bracket has no base rate, if
/// the components add up past the decimal range, or if a negative
/// experienced-carer modifier would make the weekly rate negative.
///
/// # Examples
///
/// ```
/// use care_allowance_engine::calculation::resolve_weekly_rate;
/// use care_allowance_engine::config::RateTable;
/// use care_allowance_engine::models::{AgeBracket, CarerContext, DependentProfile};
/// use rust_decimal::Decimal;
///
/// let table = RateTable {
///     special_care_addend: Decimal::from(40),
///     experienced_carer_modifier: Decimal::from(15),
///     ..RateTable::default()
/// };
/// let mut dependent = DependentProfile::full_year("child_1", AgeBracket::Age0To4);
/// dependent.is_special_care = true;
///
/// let resolution = resolve_weekly_rate(&dependent, &CarerContext::experienced(), &table, 1)?;
/// assert_eq!(resolution.weekly_rate, Decimal::from(155));
/// # Ok::<(), care_allowance_engine::error::EngineError>(())
/// ```
pub fn resolve_weekly_rate(
    dependent: &DependentProfile,
    carer: &CarerContext,
    rate_table: &RateTable,
    step_number: u32,
) -> EngineResult<RateResolution> {
    let base_rate = rate_table.base_rate(dependent.age_bracket)?;
    let age_related_element = rate_table.age_related_element(dependent.age_bracket);

    let special_care_addend = if dependent.is_special_care {
        rate_table.special_care_addend
    } else {
        Decimal::ZERO
    };

    let experience_modifier = if carer.is_experienced {
        rate_table.experienced_carer_modifier
    } else {
        Decimal::ZERO
    };

    let weekly_rate = base_rate
        .checked_add(age_related_element)
        .and_then(|rate| rate.checked_add(special_care_addend))
        .and_then(|rate| rate.checked_add(experience_modifier))
        .ok_or_else(|| {
            EngineError::invalid_rate_table(format!(
                "weekly rate for dependent '{}' exceeds the representable range",
                dependent.id
            ))
        })?;

    if weekly_rate < Decimal::ZERO {
        return Err(EngineError::invalid_rate_table(format!(
            "weekly rate for dependent '{}' resolves to {}; amounts cannot be negative",
            dependent.id, weekly_rate
        )));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "rate_resolution".to_string(),
        rule_name: "Weekly Rate Resolution".to_string(),
        input: serde_json::json!({
            "dependent_id": dependent.id,
            "age_bracket": dependent.age_bracket.label(),
            "is_special_care": dependent.is_special_care,
            "is_experienced_carer": carer.is_experienced
        }),
        output: serde_json::json!({
            "base_rate": base_rate.normalize().to_string(),
            "age_related_element": age_related_element.normalize().to_string(),
            "special_care_addend": special_care_addend.normalize().to_string(),
            "experience_modifier": experience_modifier.normalize().to_string(),
            "weekly_rate": weekly_rate.normalize().to_string()
        }),
        reasoning: format!(
            "${} base ({}) + ${} age related + ${} special care + ${} experience = ${} per week",
            base_rate.normalize(),
            dependent.age_bracket,
            age_related_element.normalize(),
            special_care_addend.normalize(),
            experience_modifier.normalize(),
            weekly_rate.normalize()
        ),
    };

    Ok(RateResolution {
        base_rate,
        age_related_element,
        special_care_addend,
        experience_modifier,
        weekly_rate,
        audit_step,
    })
}
