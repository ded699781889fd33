//! Dependent and carer models.
//!
//! This module contains the [`DependentProfile`] type describing a dependent in
//! care, the [`WeekInterval`] type recording when they are in care, and the
//! request-wide [`CarerContext`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AgeBracket;

/// Number of weeks in one care cycle.
pub const WEEKS_PER_CYCLE: u32 = 52;

/// An inclusive range of calendar weeks within the 52-week cycle.
///
/// A valid interval satisfies `1 <= start <= end <= 52`; validation happens in
/// the calculation layer so that malformed intervals can still be represented
/// and reported back to the caller.
///
/// # Example
///
/// ```
/// use care_allowance_engine::models::WeekInterval;
///
/// let interval = WeekInterval::new(1, 26);
/// assert_eq!(interval.weeks(), 26);
/// assert!(interval.overlaps(&WeekInterval::new(26, 52)));
/// assert!(!interval.overlaps(&WeekInterval::new(27, 52)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekInterval {
    /// The first week in care (inclusive).
    pub start: u32,
    /// The last week in care (inclusive).
    pub end: u32,
}

impl WeekInterval {
    /// Creates a new interval.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// An interval covering the whole cycle.
    pub fn full_year() -> Self {
        Self::new(1, WEEKS_PER_CYCLE)
    }

    /// Number of weeks covered, or zero for an inverted interval.
    pub fn weeks(&self) -> u32 {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    /// Returns true if the two intervals share at least one week.
    pub fn overlaps(&self, other: &WeekInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for WeekInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weeks {}-{}", self.start, self.end)
    }
}

/// A dependent whose allowance is being estimated.
///
/// # Example
///
/// ```
/// use care_allowance_engine::models::{AgeBracket, DependentProfile, WeekInterval};
///
/// let dependent = DependentProfile {
///     id: "child_1".to_string(),
///     age_bracket: AgeBracket::Age0To4,
///     is_special_care: false,
///     intervals: vec![WeekInterval::full_year()],
/// };
/// assert!(dependent.is_in_care());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentProfile {
    /// Identifier, unique within a calculation request.
    pub id: String,
    /// The dependent's age bracket.
    pub age_bracket: AgeBracket,
    /// Whether the dependent has special care needs.
    #[serde(default)]
    pub is_special_care: bool,
    /// The weeks of the cycle during which the dependent is in care.
    #[serde(default)]
    pub intervals: Vec<WeekInterval>,
}

impl DependentProfile {
    /// Creates a dependent in care for the whole cycle.
    pub fn full_year(id: impl Into<String>, age_bracket: AgeBracket) -> Self {
        Self {
            id: id.into(),
            age_bracket,
            is_special_care: false,
            intervals: vec![WeekInterval::full_year()],
        }
    }

    /// Returns true if the dependent has at least one care interval.
    pub fn is_in_care(&self) -> bool {
        !self.intervals.is_empty()
    }
}

/// Carer attributes that apply to every dependent in a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarerContext {
    /// Whether the carer qualifies for the experienced-carer modifier.
    #[serde(default)]
    pub is_experienced: bool,
}

impl CarerContext {
    /// A carer without the experience modifier.
    pub fn new_carer() -> Self {
        Self {
            is_experienced: false,
        }
    }

    /// A carer receiving the experience modifier.
    pub fn experienced() -> Self {
        Self {
            is_experienced: true,
        }
    }
}
