//! Request types for the Care Allowance Engine API.
//!
//! This module defines the JSON request structure for the `/calculate`
//! endpoint. The CLI reads the same structure from a file.

use serde::{Deserialize, Serialize};

use crate::config::RateTable;
use crate::models::{CarerContext, DependentProfile};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The carer's circumstances. Defaults to a carer without experience.
    #[serde(default)]
    pub carer: CarerContext,
    /// The dependents to calculate for.
    pub dependents: Vec<DependentProfile>,
    /// Optional rate table overriding the service's configured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_table: Option<RateTable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeBracket, WeekInterval};

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "carer": { "is_experienced": true },
            "dependents": [
                {
                    "id": "child_1",
                    "age_bracket": "5-10",
                    "is_special_care": true,
                    "intervals": [{ "start": 1, "end": 26 }]
                }
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert!(request.carer.is_experienced);
        assert_eq!(request.dependents.len(), 1);
        assert_eq!(request.dependents[0].age_bracket, AgeBracket::Age5To10);
        assert_eq!(request.dependents[0].intervals, vec![WeekInterval::new(1, 26)]);
        assert!(request.rate_table.is_none());
    }

    #[test]
    fn test_carer_defaults_when_omitted() {
        let json = r#"{ "dependents": [] }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert!(!request.carer.is_experienced);
        assert!(request.dependents.is_empty());
    }

    #[test]
    fn test_rate_table_override() {
        let json = r#"{
            "dependents": [],
            "rate_table": {
                "base_rates": { "0-4": "150", "5-10": "160", "11-15": "170", "16-17": "180" },
                "special_care_addend": "25"
            }
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let table = request.rate_table.unwrap();
        assert_eq!(table.base_rates.len(), 4);
        assert!(table.experienced_carer_modifier.is_zero());
    }

    #[test]
    fn test_missing_dependents_is_an_error() {
        let result = serde_json::from_str::<CalculationRequest>(r#"{ "carer": {} }"#);
        assert!(result.unwrap_err().to_string().contains("missing field"));
    }
}
