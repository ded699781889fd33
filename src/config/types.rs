//! Configuration types for allowance calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files or supplied per request.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AgeBracket;

/// Seed values for the default base rates, youngest bracket first.
pub const DEFAULT_ALLOWANCE_SEEDS: [i64; 3] = [100, 200, 300];

/// Metadata about the allowance scheme a rate table belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeMetadata {
    /// Short code identifying the scheme.
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or effective date of the rates.
    pub version: String,
    /// ISO currency code the amounts are expressed in.
    pub currency: String,
}

impl Default for SchemeMetadata {
    fn default() -> Self {
        Self {
            code: "default".to_string(),
            name: "Default Care Allowance".to_string(),
            version: "builtin".to_string(),
            currency: "GBP".to_string(),
        }
    }
}

/// Weekly rates used to price a dependent's care.
///
/// Every adjustment is additive: a dependent's weekly rate is the base rate for
/// their bracket, plus any age-related step-up for the bracket, plus the
/// special-care addend when applicable, plus the experienced-carer modifier when
/// the carer qualifies. The modifier may be negative; every other amount must be
/// non-negative.
///
/// # Example
///
/// ```
/// use care_allowance_engine::config::RateTable;
/// use care_allowance_engine::models::AgeBracket;
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default();
/// assert_eq!(table.base_rate(AgeBracket::Age0To4).unwrap(), Decimal::from(100));
/// assert_eq!(table.base_rate(AgeBracket::Age16To17).unwrap(), Decimal::from(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Base weekly rate per age bracket.
    pub base_rates: BTreeMap<AgeBracket, Decimal>,
    /// Weekly amount added for dependents with special care needs.
    #[serde(default)]
    pub special_care_addend: Decimal,
    /// Weekly amount added (or subtracted) for experienced carers.
    #[serde(default)]
    pub experienced_carer_modifier: Decimal,
    /// Optional bracket-specific weekly step-ups on top of the base rate.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub age_related_elements: BTreeMap<AgeBracket, Decimal>,
}

impl Default for RateTable {
    fn default() -> Self {
        let seeds: Vec<Decimal> = DEFAULT_ALLOWANCE_SEEDS
            .iter()
            .copied()
            .map(Decimal::from)
            .collect();
        Self::seeded(&seeds)
    }
}

impl RateTable {
    /// Builds a flat rate table from allowance seed values.
    ///
    /// Seeds are assigned to brackets youngest first; when there are fewer
    /// seeds than brackets the last seed fills the remaining brackets. The
    /// special-care addend and experienced-carer modifier are zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateTable` if `seeds` is empty or holds a negative value.
    ///
    /// # Example
    ///
    /// ```
    /// use care_allowance_engine::config::RateTable;
    /// use care_allowance_engine::models::AgeBracket;
    /// use rust_decimal::Decimal;
    ///
    /// let table = RateTable::from_seed_allowances(&[Decimal::from(150)])?;
    /// assert_eq!(table.base_rate(AgeBracket::Age11To15)?, Decimal::from(150));
    /// # Ok::<(), care_allowance_engine::error::EngineError>(())
    /// ```
    pub fn from_seed_allowances(seeds: &[Decimal]) -> EngineResult<Self> {
        if seeds.is_empty() {
            return Err(EngineError::invalid_rate_table(
                "at least one allowance seed is required",
            ));
        }
        if let Some(negative) = seeds.iter().find(|seed| **seed < Decimal::ZERO) {
            return Err(EngineError::invalid_rate_table(format!(
                "allowance seed {} is negative",
                negative
            )));
        }
        Ok(Self::seeded(seeds))
    }

    fn seeded(seeds: &[Decimal]) -> Self {
        let base_rates = AgeBracket::ALL
            .iter()
            .enumerate()
            .filter_map(|(index, bracket)| {
                seeds
                    .get(index)
                    .or_else(|| seeds.last())
                    .map(|rate| (*bracket, *rate))
            })
            .collect();

        Self {
            base_rates,
            special_care_addend: Decimal::ZERO,
            experienced_carer_modifier: Decimal::ZERO,
            age_related_elements: BTreeMap::new(),
        }
    }

    /// Returns the base weekly rate for a bracket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateTable` if the bracket has no entry.
    pub fn base_rate(&self, bracket: AgeBracket) -> EngineResult<Decimal> {
        self.base_rates.get(&bracket).copied().ok_or_else(|| {
            EngineError::invalid_rate_table(format!("no base rate for age bracket {}", bracket))
        })
    }

    /// Returns the age-related weekly step-up for a bracket, zero if none is defined.
    pub fn age_related_element(&self, bracket: AgeBracket) -> Decimal {
        self.age_related_elements
            .get(&bracket)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Checks that no amount other than the experienced-carer modifier is negative.
    pub fn validate(&self) -> EngineResult<()> {
        for (bracket, rate) in &self.base_rates {
            if *rate < Decimal::ZERO {
                return Err(EngineError::invalid_rate_table(format!(
                    "base rate for age bracket {} is negative ({})",
                    bracket, rate
                )));
            }
        }

        if self.special_care_addend < Decimal::ZERO {
            return Err(EngineError::invalid_rate_table(format!(
                "special care addend is negative ({})",
                self.special_care_addend
            )));
        }

        for (bracket, element) in &self.age_related_elements {
            if *element < Decimal::ZERO {
                return Err(EngineError::invalid_rate_table(format!(
                    "age related element for age bracket {} is negative ({})",
                    bracket, element
                )));
            }
        }

        Ok(())
    }

    /// Checks [`RateTable::validate`] and additionally that every bracket has a base rate.
    pub fn validate_complete(&self) -> EngineResult<()> {
        self.validate()?;
        for bracket in AgeBracket::ALL {
            self.base_rate(bracket)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_table_is_seeded_from_default_allowances() {
        let table = RateTable::default();
        assert_eq!(table.base_rate(AgeBracket::Age0To4).unwrap(), dec("100"));
        assert_eq!(table.base_rate(AgeBracket::Age5To10).unwrap(), dec("200"));
        assert_eq!(table.base_rate(AgeBracket::Age11To15).unwrap(), dec("300"));
        assert_eq!(table.base_rate(AgeBracket::Age16To17).unwrap(), dec("300"));
        assert!(table.special_care_addend.is_zero());
        assert!(table.experienced_carer_modifier.is_zero());
        assert!(table.age_related_elements.is_empty());
        assert!(table.validate_complete().is_ok());
    }

    #[test]
    fn test_seeds_beyond_bracket_count_are_ignored() {
        let seeds = [dec("1"), dec("2"), dec("3"), dec("4"), dec("5")];
        let table = RateTable::from_seed_allowances(&seeds).unwrap();
        assert_eq!(table.base_rates.len(), 4);
        assert_eq!(table.base_rate(AgeBracket::Age16To17).unwrap(), dec("4"));
    }

    #[test]
    fn test_empty_seeds_are_rejected() {
        let result = RateTable::from_seed_allowances(&[]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidRateTable);
    }

    #[test]
    fn test_negative_seed_is_rejected() {
        let result = RateTable::from_seed_allowances(&[dec("100"), dec("-5")]);
        match result {
            Err(EngineError::InvalidRateTable { message }) => {
                assert!(message.contains("-5"));
            }
            other => panic!("Expected InvalidRateTable, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_bracket_is_invalid_rate_table() {
        let mut table = RateTable::default();
        table.base_rates.remove(&AgeBracket::Age5To10);

        let err = table.base_rate(AgeBracket::Age5To10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRateTable);
        assert!(err.to_string().contains("5-10"));
        assert!(table.validate().is_ok());
        assert!(table.validate_complete().is_err());
    }

    #[test]
    fn test_negative_base_rate_fails_validation() {
        let mut table = RateTable::default();
        table.base_rates.insert(AgeBracket::Age0To4, dec("-1"));
        assert_eq!(
            table.validate().unwrap_err().kind(),
            ErrorKind::InvalidRateTable
        );
    }

    #[test]
    fn test_negative_special_care_addend_fails_validation() {
        let table = RateTable {
            special_care_addend: dec("-10"),
            ..RateTable::default()
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_negative_experience_modifier_is_allowed() {
        let table = RateTable {
            experienced_carer_modifier: dec("-10"),
            ..RateTable::default()
        };
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_age_related_element_defaults_to_zero() {
        let mut table = RateTable::default();
        assert!(table.age_related_element(AgeBracket::Age11To15).is_zero());

        table
            .age_related_elements
            .insert(AgeBracket::Age11To15, dec("12.50"));
        assert_eq!(table.age_related_element(AgeBracket::Age11To15), dec("12.50"));
    }

    #[test]
    fn test_deserialize_rate_table_from_yaml() {
        let yaml = r#"
base_rates:
  "0-4": "182.00"
  "5-10": "161.00"
  "11-15": "184.00"
  "16-17": "214.00"
special_care_addend: "45.00"
experienced_carer_modifier: "20.00"
"#;

        let table: RateTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.base_rate(AgeBracket::Age16To17).unwrap(), dec("214.00"));
        assert_eq!(table.special_care_addend, dec("45.00"));
        assert_eq!(table.experienced_carer_modifier, dec("20.00"));
        assert!(table.age_related_elements.is_empty());
    }

    #[test]
    fn test_rate_table_json_round_trip_keys_by_label() {
        let table = RateTable::default();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"0-4\":\"100\""));
        assert!(!json.contains("age_related_elements"));

        let parsed: RateTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }
}
