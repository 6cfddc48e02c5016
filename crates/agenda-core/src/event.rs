//! Agenda events and day membership.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{AgendaError, Result};
use crate::frequency::Frequency;
use crate::repetition::Repetition;
use crate::termination::Termination;

/// A titled span of time, optionally repeating.
///
/// An event starts out simple. [`Event::set_repetition`] turns it into a
/// recurring event; terminations and exceptions only apply from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    title: String,
    start: NaiveDateTime,
    duration: Duration,
    repetition: Option<Repetition>,
}

impl Event {
    /// Creates a one-off event. The duration is not validated.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            title: title.into(),
            start,
            duration,
            repetition: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// End of the first occurrence, exclusive.
    pub fn end(&self) -> NaiveDateTime {
        shift(self.start, self.duration)
    }

    pub const fn repetition(&self) -> Option<&Repetition> {
        self.repetition.as_ref()
    }

    pub const fn is_recurring(&self) -> bool {
        self.repetition.is_some()
    }

    /// Makes the event repeat at `frequency` from its start date.
    ///
    /// Replaces any earlier repetition together with its exceptions and termination.
    pub fn set_repetition(&mut self, frequency: Frequency) {
        let previous = self
            .repetition
            .replace(Repetition::new(frequency, self.start.date()));
        if previous.is_some() {
            tracing::debug!(title = %self.title, %frequency, "repetition replaced");
        }
    }

    /// Skips the occurrence on `date`. Does nothing if the event does not repeat.
    pub fn add_exception(&mut self, date: NaiveDate) {
        if let Some(repetition) = &mut self.repetition {
            repetition.add_exception(date);
        }
    }

    /// Ends the repetition on `date_inclusive`.
    ///
    /// Returns [`AgendaError::InvalidState`] if the event does not repeat.
    pub fn set_termination_date(&mut self, date_inclusive: NaiveDate) -> Result<()> {
        self.repetition_mut()?
            .set_termination(Termination::until(date_inclusive));
        Ok(())
    }

    /// Ends the repetition after `count` occurrences.
    ///
    /// Returns [`AgendaError::InvalidState`] if the event does not repeat, and
    /// [`AgendaError::InvalidArgument`] if `count` is less than one.
    pub fn set_termination_count(&mut self, count: i64) -> Result<()> {
        let repetition = self.repetition_mut()?;
        repetition.set_termination(Termination::after(count)?);
        Ok(())
    }

    /// Date of the last occurrence, if the event repeats with a termination.
    pub fn termination_date(&self) -> Option<NaiveDate> {
        self.repetition.as_ref().and_then(Repetition::last_occurrence)
    }

    /// Total number of occurrences, or 0 if the event is not a bounded repetition.
    pub fn number_of_occurrences(&self) -> i64 {
        self.repetition.as_ref().map_or(0, |repetition| {
            repetition.termination().map_or(0, |termination| {
                termination.calculate_number_of_occurrences(self.start.date(), repetition.frequency())
            })
        })
    }

    /// Whether any occurrence of the event occupies part of `day`.
    ///
    /// A one-off event covers every date from its start up to the date of its
    /// last occupied instant, so late evening events also belong to the next
    /// day. A recurring event covers the days its repetition matches, plus the
    /// day after its last occurrence when that occurrence runs past midnight.
    pub fn is_in_day(&self, day: NaiveDate) -> bool {
        let Some(repetition) = &self.repetition else {
            let start_day = self.start.date();
            let end_day = shift(self.end(), -Duration::nanoseconds(1)).date();
            return start_day <= day && day <= end_day;
        };

        let recurring = repetition.is_recurring_on(day);
        let last_overflow = repetition.last_occurrence().is_some_and(|last| {
            day == last
                || (day > last && shift(last.and_time(self.start.time()), self.duration).date() == day)
        });

        if !(recurring || last_overflow) {
            return false;
        }

        let occurrence_start = day.and_time(self.start.time());
        let occurrence_end = shift(occurrence_start, self.duration);
        let touches = occurrence_end.date() >= day && occurrence_start.date() <= day;
        tracing::trace!(title = %self.title, %day, recurring, last_overflow, touches, "day membership");
        touches
    }

    fn repetition_mut(&mut self) -> Result<&mut Repetition> {
        self.repetition
            .as_mut()
            .ok_or_else(|| AgendaError::InvalidState {
                title: self.title.clone(),
            })
    }
}

/// Adds `by` to `at`, clamping to the representable range.
fn shift(at: NaiveDateTime, by: Duration) -> NaiveDateTime {
    at.checked_add_signed(by).unwrap_or(if by < Duration::zero() {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event{{title='{}', start={}, duration={}min}}",
            self.title,
            self.start.format("%Y-%m-%d %H:%M"),
            self.duration.num_minutes()
        )
    }
}
