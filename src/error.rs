//! Error types for the Care Allowance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration or
//! calculating allowances.

use thiserror::Error;

use crate::models::WeekInterval;

/// The main error type for the Care Allowance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use care_allowance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rates.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rates.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration '{path}': {message}")]
    ConfigParseError {
        /// The path (or source name) of the configuration that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The rate table is missing an entry or holds a negative amount.
    #[error("Invalid rate table: {message}")]
    InvalidRateTable {
        /// A description of what made the table invalid.
        message: String,
    },

    /// A week interval is out of range or inverted.
    #[error("Invalid interval {interval} for dependent '{dependent_id}': {message}")]
    InvalidInterval {
        /// The dependent the interval belongs to.
        dependent_id: String,
        /// The offending interval.
        interval: WeekInterval,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// Two intervals of the same dependent share at least one week.
    #[error("Overlapping intervals {first} and {second} for dependent '{dependent_id}'")]
    OverlappingIntervals {
        /// The dependent the intervals belong to.
        dependent_id: String,
        /// The earlier-starting interval.
        first: WeekInterval,
        /// The interval overlapping it.
        second: WeekInterval,
    },

    /// The same dependent id appears more than once in a request.
    #[error("Duplicate dependent id: {id}")]
    DuplicateDependent {
        /// The repeated id.
        id: String,
    },
}

/// Coarse classification of [`EngineError`] values.
///
/// Callers that translate errors into user-facing messages match on the kind
/// rather than on the full error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be found or parsed.
    Config,
    /// The rate table is missing an entry or holds a negative amount.
    InvalidRateTable,
    /// A week interval is out of range or inverted.
    InvalidInterval,
    /// Intervals of one dependent overlap.
    OverlappingIntervals,
    /// A dependent id is repeated within a request.
    DuplicateDependent,
}

impl EngineError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::Config
            }
            EngineError::InvalidRateTable { .. } => ErrorKind::InvalidRateTable,
            EngineError::InvalidInterval { .. } => ErrorKind::InvalidInterval,
            EngineError::OverlappingIntervals { .. } => ErrorKind::OverlappingIntervals,
            EngineError::DuplicateDependent { .. } => ErrorKind::DuplicateDependent,
        }
    }

    pub(crate) fn invalid_rate_table(message: impl Into<String>) -> Self {
        EngineError::InvalidRateTable {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.yaml"
        );
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration '/config/bad.yaml': invalid YAML syntax"
        );
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_invalid_rate_table_displays_message() {
        let error = EngineError::invalid_rate_table("no base rate for age bracket 16-17");
        assert_eq!(
            error.to_string(),
            "Invalid rate table: no base rate for age bracket 16-17"
        );
        assert_eq!(error.kind(), ErrorKind::InvalidRateTable);
    }

    #[test]
    fn test_invalid_interval_displays_dependent_and_weeks() {
        let error = EngineError::InvalidInterval {
            dependent_id: "child_1".to_string(),
            interval: WeekInterval::new(30, 20),
            message: "start week is after end week".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid interval weeks 30-20 for dependent 'child_1': start week is after end week"
        );
        assert_eq!(error.kind(), ErrorKind::InvalidInterval);
    }

    #[test]
    fn test_overlapping_intervals_displays_both_intervals() {
        let error = EngineError::OverlappingIntervals {
            dependent_id: "child_1".to_string(),
            first: WeekInterval::new(1, 10),
            second: WeekInterval::new(5, 15),
        };
        assert_eq!(
            error.to_string(),
            "Overlapping intervals weeks 1-10 and weeks 5-15 for dependent 'child_1'"
        );
        assert_eq!(error.kind(), ErrorKind::OverlappingIntervals);
    }

    #[test]
    fn test_duplicate_dependent_displays_id() {
        let error = EngineError::DuplicateDependent {
            id: "child_1".to_string(),
        };
        assert_eq!(error.to_string(), "Duplicate dependent id: child_1");
        assert_eq!(error.kind(), ErrorKind::DuplicateDependent);
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_table() -> EngineResult<()> {
            Err(EngineError::invalid_rate_table("empty"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_table()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
