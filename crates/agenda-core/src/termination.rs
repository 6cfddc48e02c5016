//! End conditions for repeating events.

use std::num::NonZeroU64;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, Result};
use crate::frequency::Frequency;

/// Where a repetition stops.
///
/// A termination is either an inclusive end date or a number of occurrences,
/// never both. It does not know the start date or frequency of the series it
/// bounds, so every query takes them as arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The series ends on this date, inclusive.
    Until(NaiveDate),
    /// The series ends after this many occurrences.
    Count(NonZeroU64),
}

impl Termination {
    /// Creates a termination on an inclusive end date.
    #[must_use]
    pub const fn until(date_inclusive: NaiveDate) -> Self {
        Self::Until(date_inclusive)
    }

    /// Creates a termination after `count` occurrences.
    ///
    /// Returns [`AgendaError::InvalidArgument`] if `count` is less than one.
    pub fn after(count: i64) -> Result<Self> {
        u64::try_from(count)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self::Count)
            .ok_or(AgendaError::InvalidArgument { count })
    }

    /// The stored occurrence count, or 0 for a date-bounded termination.
    #[must_use]
    pub const fn number_of_occurrences(&self) -> u64 {
        match self {
            Self::Count(count) => count.get(),
            Self::Until(_) => 0,
        }
    }

    /// The stored end date, or `None` for a count-bounded termination.
    #[must_use]
    pub const fn termination_date_inclusive(&self) -> Option<NaiveDate> {
        match self {
            Self::Until(date) => Some(*date),
            Self::Count(_) => None,
        }
    }

    /// Date of the last occurrence of a series starting on `start`.
    ///
    /// For a count this is `start` plus `count - 1` steps of `frequency`,
    /// saturating at [`NaiveDate::MAX`] when the series outruns the calendar.
    pub fn calculate_termination_date(&self, start: NaiveDate, frequency: Frequency) -> NaiveDate {
        match self {
            Self::Until(date) => *date,
            Self::Count(count) => frequency
                .add_steps(start, count.get() - 1)
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Number of occurrences of a series starting on `start`, end inclusive.
    pub fn calculate_number_of_occurrences(&self, start: NaiveDate, frequency: Frequency) -> i64 {
        match self {
            Self::Until(date) => frequency.steps_between(start, *date) + 1,
            Self::Count(count) => i64::try_from(count.get()).unwrap_or(i64::MAX),
        }
    }

    /// Whether `date` lies past the end of a series starting on `start`.
    ///
    /// The boundary itself (end date or last counted occurrence) is not after
    /// the termination.
    pub fn is_after_termination(&self, date: NaiveDate, frequency: Frequency, start: NaiveDate) -> bool {
        match self {
            Self::Until(end) => date > *end,
            Self::Count(count) => {
                let occurred = frequency.steps_between(start, date) + 1;
                i64::try_from(count.get()).is_ok_and(|count| occurred > count)
            }
        }
    }
}
