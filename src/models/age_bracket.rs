//! Age bracket model.
//!
//! Every dependent falls into exactly one of four fixed age ranges, and the
//! bracket selects the base weekly rate from the rate table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The age range a dependent belongs to.
///
/// Brackets serialize as their range labels (`"0-4"`, `"5-10"`, `"11-15"`,
/// `"16-17"`), which is also how they are keyed in YAML and JSON rate tables.
///
/// # Example
///
/// ```
/// use care_allowance_engine::models::AgeBracket;
///
/// let bracket: AgeBracket = "11-15".parse().unwrap();
/// assert_eq!(bracket, AgeBracket::Age11To15);
/// assert_eq!(bracket.to_string(), "11-15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    /// Ages 0 to 4.
    #[serde(rename = "0-4")]
    Age0To4,
    /// Ages 5 to 10.
    #[serde(rename = "5-10")]
    Age5To10,
    /// Ages 11 to 15.
    #[serde(rename = "11-15")]
    Age11To15,
    /// Ages 16 to 17.
    #[serde(rename = "16-17")]
    Age16To17,
}

impl AgeBracket {
    /// All brackets, youngest first.
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Age0To4,
        AgeBracket::Age5To10,
        AgeBracket::Age11To15,
        AgeBracket::Age16To17,
    ];

    /// Returns the range label used in configuration and on the wire.
    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Age0To4 => "0-4",
            AgeBracket::Age5To10 => "5-10",
            AgeBracket::Age11To15 => "11-15",
            AgeBracket::Age16To17 => "16-17",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the four bracket labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown age bracket '{0}', expected one of 0-4, 5-10, 11-15, 16-17")]
pub struct ParseAgeBracketError(String);

impl FromStr for AgeBracket {
    type Err = ParseAgeBracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeBracket::ALL
            .into_iter()
            .find(|bracket| bracket.label() == s.trim())
            .ok_or_else(|| ParseAgeBracketError(s.to_string()))
    }
}
