//! Input validation for allowance calculations.
//!
//! Intervals must lie within the 52-week cycle, must not be inverted, and must
//! not overlap other intervals of the same dependent. Overlapping intervals are
//! rejected rather than merged, for every dependent alike.

use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::{DependentProfile, WEEKS_PER_CYCLE, WeekInterval};

/// Checks that a single interval lies within the cycle and is not inverted.
///
/// # Errors
///
/// Returns `InvalidInterval` if `start < 1`, `end > 52`, or `start > end`.
///
/// # Examples
///
/// ```
/// use care_allowance_engine::calculation::validate_interval;
/// use care_allowance_engine::models::WeekInterval;
///
/// assert!(validate_interval("child_1", &WeekInterval::new(1, 52)).is_ok());
/// assert!(validate_interval("child_1", &WeekInterval::new(0, 10)).is_err());
/// assert!(validate_interval("child_1", &WeekInterval::new(30, 20)).is_err());
/// ```
pub fn validate_interval(dependent_id: &str, interval: &WeekInterval) -> EngineResult<()> {
    let message = if interval.start < 1 {
        Some(format!("start week must be at least 1, got {}", interval.start))
    } else if interval.end > WEEKS_PER_CYCLE {
        Some(format!(
            "end week must be at most {}, got {}",
            WEEKS_PER_CYCLE, interval.end
        ))
    } else if interval.start > interval.end {
        Some("start week is after end week".to_string())
    } else {
        None
    };

    match message {
        Some(message) => Err(EngineError::InvalidInterval {
            dependent_id: dependent_id.to_string(),
            interval: *interval,
            message,
        }),
        None => Ok(()),
    }
}

/// Checks every interval of a dependent, then checks that none overlap.
///
/// Adjacent intervals such as weeks 1-10 and 11-20 are allowed. The order in
/// which intervals are supplied does not matter.
///
/// # Errors
///
/// Returns `InvalidInterval` for the first malformed interval, or
/// `OverlappingIntervals` naming the first overlapping pair by start week.
pub fn validate_intervals(dependent: &DependentProfile) -> EngineResult<()> {
    for interval in &dependent.intervals {
        validate_interval(&dependent.id, interval)?;
    }

    let mut sorted = dependent.intervals.clone();
    sorted.sort_by_key(|interval| (interval.start, interval.end));

    // Sorted by start, any overlap shows up between neighbours.
    for pair in sorted.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(EngineError::OverlappingIntervals {
                dependent_id: dependent.id.clone(),
                first: pair[0],
                second: pair[1],
            });
        }
    }

    Ok(())
}

/// Validates every dependent of a request.
///
/// # Errors
///
/// Returns `DuplicateDependent` if an id is repeated, otherwise the first
/// interval error found in request order.
pub fn validate_dependents(dependents: &[DependentProfile]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(dependents.len());

    for dependent in dependents {
        if !seen.insert(dependent.id.as_str()) {
            return Err(EngineError::DuplicateDependent {
                id: dependent.id.clone(),
            });
        }
        validate_intervals(dependent)?;
    }

    Ok(())
}
