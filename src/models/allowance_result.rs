//! Allowance result models for the Care Allowance Engine.
//!
//! This module contains the [`AllowanceResult`] type and its associated structures
//! that capture all outputs from an allowance calculation, including the
//! per-dependent breakdown, periodic totals, and audit traces.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::AgeBracket;

/// Number of decimal places shown to users.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Rounds an exact amount for presentation.
///
/// Internal totals are never rounded; this is only applied at the display
/// boundary. Midpoints round away from zero.
///
/// # Example
///
/// ```
/// use care_allowance_engine::models::round_for_display;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let monthly = Decimal::from(5200) / Decimal::from(12);
/// assert_eq!(round_for_display(monthly), Decimal::from_str("433.33").unwrap());
/// ```
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// One dependent's prorated annual contribution, split into its components.
///
/// `total_allowance` always equals `base_allowance + age_related_element +
/// special_care_amount + experience_amount`, and also equals
/// `weekly_rate * active_weeks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentAllowance {
    /// The dependent's id.
    pub id: String,
    /// The dependent's age bracket.
    pub age_bracket: AgeBracket,
    /// Whether the special-care addend applied.
    pub is_special_care: bool,
    /// Weeks in care within the cycle.
    pub active_weeks: u32,
    /// The resolved full-year weekly rate.
    pub weekly_rate: Decimal,
    /// Base rate for the bracket times active weeks.
    pub base_allowance: Decimal,
    /// Bracket step-up times active weeks (zero for a flat table).
    pub age_related_element: Decimal,
    /// Special-care addend times active weeks.
    pub special_care_amount: Decimal,
    /// Experienced-carer modifier times active weeks.
    pub experience_amount: Decimal,
    /// The dependent's prorated annual amount.
    pub total_allowance: Decimal,
}

impl DependentAllowance {
    /// Sum of the reported components.
    pub fn components_total(&self) -> Decimal {
        self.base_allowance
            + self.age_related_element
            + self.special_care_amount
            + self.experience_amount
    }
}

/// The complete result of an allowance calculation.
///
/// All totals are exact decimals; use [`AllowanceResult::display_totals`] for
/// values rounded to whole cents.
///
/// # Example
///
/// ```
/// use care_allowance_engine::models::AllowanceResult;
///
/// let result = AllowanceResult::empty();
/// assert!(result.per_dependent.is_empty());
/// assert!(result.yearly_total.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceResult {
    /// Per-dependent breakdown, in request order.
    pub per_dependent: Vec<DependentAllowance>,
    /// Yearly total averaged over the 52-week cycle.
    pub weekly_total: Decimal,
    /// Yearly total averaged over twelve months.
    pub monthly_total: Decimal,
    /// Sum of every dependent's prorated annual amount.
    pub yearly_total: Decimal,
}

impl AllowanceResult {
    /// A result with no dependents and zero totals.
    pub fn empty() -> Self {
        Self {
            per_dependent: vec![],
            weekly_total: Decimal::ZERO,
            monthly_total: Decimal::ZERO,
            yearly_total: Decimal::ZERO,
        }
    }

    /// Looks up a dependent's breakdown by id.
    pub fn dependent(&self, id: &str) -> Option<&DependentAllowance> {
        self.per_dependent.iter().find(|d| d.id == id)
    }

    /// Returns the periodic totals rounded for presentation.
    pub fn display_totals(&self) -> DisplayTotals {
        DisplayTotals {
            weekly_total: round_for_display(self.weekly_total),
            monthly_total: round_for_display(self.monthly_total),
            yearly_total: round_for_display(self.yearly_total),
        }
    }
}

/// Periodic totals rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTotals {
    /// Rounded weekly total.
    pub weekly_total: Decimal,
    /// Rounded monthly total.
    pub monthly_total: Decimal,
    /// Rounded yearly total.
    pub yearly_total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation
/// but may be worth surfacing to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_allowance() -> DependentAllowance {
        DependentAllowance {
            id: "child_1".to_string(),
            age_bracket: AgeBracket::Age0To4,
            is_special_care: true,
            active_weeks: 10,
            weekly_rate: dec("135.50"),
            base_allowance: dec("1000"),
            age_related_element: dec("0"),
            special_care_amount: dec("250"),
            experience_amount: dec("105"),
            total_allowance: dec("1355"),
        }
    }

    #[test]
    fn test_components_total_reconciles() {
        let allowance = sample_allowance();
        assert_eq!(allowance.components_total(), allowance.total_allowance);
    }

    #[test]
    fn test_round_for_display_rounds_midpoint_away_from_zero() {
        assert_eq!(round_for_display(dec("10.005")), dec("10.01"));
        assert_eq!(round_for_display(dec("10.004")), dec("10.00"));
    }

    #[test]
    fn test_display_totals_round_only_at_boundary() {
        let yearly = dec("5200");
        let result = AllowanceResult {
            per_dependent: vec![],
            weekly_total: yearly / Decimal::from(52),
            monthly_total: yearly / Decimal::from(12),
            yearly_total: yearly,
        };

        assert_ne!(result.monthly_total, dec("433.33"));
        let display = result.display_totals();
        assert_eq!(display.weekly_total, dec("100.00"));
        assert_eq!(display.monthly_total, dec("433.33"));
        assert_eq!(display.yearly_total, dec("5200.00"));
    }

    #[test]
    fn test_dependent_lookup_by_id() {
        let result = AllowanceResult {
            per_dependent: vec![sample_allowance()],
            ..AllowanceResult::empty()
        };
        assert!(result.dependent("child_1").is_some());
        assert!(result.dependent("child_2").is_none());
    }

    #[test]
    fn test_dependent_allowance_serialization() {
        let json = serde_json::to_string(&sample_allowance()).unwrap();
        assert!(json.contains("\"id\":\"child_1\""));
        assert!(json.contains("\"age_bracket\":\"0-4\""));
        assert!(json.contains("\"active_weeks\":10"));
        assert!(json.contains("\"weekly_rate\":\"135.50\""));
        assert!(json.contains("\"total_allowance\":\"1355\""));
    }

    #[test]
    fn test_allowance_result_deserialization() {
        let json = r#"{
            "per_dependent": [],
            "weekly_total": "0",
            "monthly_total": "0",
            "yearly_total": "0"
        }"#;

        let result: AllowanceResult = serde_json::from_str(json).unwrap();
        assert_eq!(result, AllowanceResult::empty());
    }

    #[test]
    fn test_audit_trace_serialization() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "rate_resolution".to_string(),
                rule_name: "Rate Resolution".to_string(),
                input: serde_json::json!({}),
                output: serde_json::json!({}),
                reasoning: "Test reasoning".to_string(),
            }],
            warnings: vec![AuditWarning {
                code: "DEPENDENT_NOT_IN_CARE".to_string(),
                message: "Test warning".to_string(),
                severity: "low".to_string(),
            }],
        };

        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"steps\":["));
        assert!(json.contains("\"rule_id\":\"rate_resolution\""));
        assert!(json.contains("\"warnings\":["));
        assert!(json.contains("\"severity\":\"low\""));
    }
}
