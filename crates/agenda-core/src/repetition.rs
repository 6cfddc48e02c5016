//! Repetition rules: frequency, skipped dates and end condition.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::frequency::Frequency;
use crate::termination::Termination;

/// How an event repeats from its reference start date.
///
/// A repetition is created by [`Event::set_repetition`](crate::Event::set_repetition)
/// and anchored at the event's start date; it is never shared between events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repetition {
    frequency: Frequency,
    start: NaiveDate,
    exceptions: HashSet<NaiveDate>,
    termination: Option<Termination>,
}

impl Repetition {
    /// Creates an open-ended repetition anchored at `start`.
    pub fn new(frequency: Frequency, start: NaiveDate) -> Self {
        Self {
            frequency,
            start,
            exceptions: HashSet::new(),
            termination: None,
        }
    }

    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The reference date that weekday and day-of-month alignment is checked against.
    pub const fn start_date(&self) -> NaiveDate {
        self.start
    }

    pub const fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    /// Dates on which the event is skipped, in no particular order.
    pub fn exceptions(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.exceptions.iter().copied()
    }

    /// Skips the occurrence on `date`. Adding the same date twice is harmless.
    pub fn add_exception(&mut self, date: NaiveDate) {
        self.exceptions.insert(date);
    }

    /// Bounds the repetition, replacing any earlier termination.
    pub fn set_termination(&mut self, termination: Termination) {
        if let Some(previous) = self.termination.replace(termination) {
            tracing::debug!(?previous, replacement = ?termination, "termination replaced");
        }
    }

    /// The last occurrence date, if the repetition is bounded.
    pub fn last_occurrence(&self) -> Option<NaiveDate> {
        self.termination
            .map(|t| t.calculate_termination_date(self.start, self.frequency))
    }

    /// Whether an occurrence of the series falls on `day`.
    ///
    /// Exceptions win over everything, then days before the start are
    /// rejected. With a termination, its last date always matches and later
    /// days never do. Remaining days are checked against the frequency:
    /// weekly keeps the start weekday and monthly keeps the start day of the
    /// month. Yearly only requires a non-negative number of elapsed years and
    /// does not check month or day alignment.
    pub fn is_recurring_on(&self, day: NaiveDate) -> bool {
        if self.exceptions.contains(&day) || day < self.start {
            return false;
        }

        if let Some(termination) = &self.termination {
            if day == termination.calculate_termination_date(self.start, self.frequency) {
                tracing::trace!(%day, "last occurrence of repetition");
                return true;
            }
            if termination.is_after_termination(day, self.frequency, self.start) {
                tracing::trace!(%day, "day is past termination");
                return false;
            }
        }

        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => day.weekday() == self.start.weekday(),
            Frequency::Monthly => day.day() == self.start.day(),
            Frequency::Yearly => self.frequency.steps_between(self.start, day) >= 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn never_recurs_before_start() {
        for frequency in [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
        ] {
            let rep = Repetition::new(frequency, date(2020, 11, 15));
            assert!(!rep.is_recurring_on(date(2020, 11, 14)), "{frequency}");
            assert!(!rep.is_recurring_on(date(2019, 11, 15)), "{frequency}");
            assert!(rep.is_recurring_on(date(2020, 11, 15)), "{frequency}");
        }
    }

    #[test]
    fn daily_matches_every_day() {
        let rep = Repetition::new(Frequency::Daily, date(2020, 11, 10));
        assert!(rep.is_recurring_on(date(2020, 11, 11)));
        assert!(rep.is_recurring_on(date(2024, 2, 29)));
    }

    #[test]
    fn weekly_matches_start_weekday() {
        // 2020-11-01 is a Sunday
        let rep = Repetition::new(Frequency::Weekly, date(2020, 11, 1));
        assert!(!rep.is_recurring_on(date(2020, 11, 2)));
        assert!(rep.is_recurring_on(date(2020, 11, 8)));
        assert!(rep.is_recurring_on(date(2021, 3, 7)));
    }

    #[test]
    fn monthly_matches_start_day_of_month() {
        let rep = Repetition::new(Frequency::Monthly, date(2020, 11, 15));
        assert!(rep.is_recurring_on(date(2020, 12, 15)));
        assert!(!rep.is_recurring_on(date(2020, 12, 14)));
        assert!(rep.is_recurring_on(date(2021, 2, 15)));
    }

    #[test]
    fn yearly_fallback_accepts_any_later_day() {
        let rep = Repetition::new(Frequency::Yearly, date(2020, 11, 15));
        assert!(rep.is_recurring_on(date(2021, 11, 15)));
        assert!(rep.is_recurring_on(date(2021, 11, 14)));
        assert!(rep.is_recurring_on(date(2021, 3, 2)));
    }

    #[test]
    fn exceptions_suppress_matching_days() {
        let mut rep = Repetition::new(Frequency::Daily, date(2020, 11, 1));
        rep.add_exception(date(2020, 11, 2));
        rep.add_exception(date(2020, 11, 3));
        rep.add_exception(date(2020, 11, 3));
        assert!(!rep.is_recurring_on(date(2020, 11, 2)));
        assert!(!rep.is_recurring_on(date(2020, 11, 3)));
        assert!(rep.is_recurring_on(date(2020, 11, 4)));
        assert_eq!(rep.exceptions().count(), 2);
    }

    #[test]
    fn exception_before_start_is_still_false() {
        let mut rep = Repetition::new(Frequency::Yearly, date(2021, 11, 15));
        rep.add_exception(date(2020, 11, 15));
        assert!(!rep.is_recurring_on(date(2020, 11, 15)));
    }

    #[test]
    fn exception_wins_over_last_occurrence() {
        let mut rep = Repetition::new(Frequency::Monthly, date(2020, 11, 15));
        rep.set_termination(Termination::until(date(2021, 1, 15)));
        rep.add_exception(date(2021, 1, 15));
        assert!(!rep.is_recurring_on(date(2021, 1, 15)));
    }

    #[test]
    fn count_termination_stops_series() {
        let mut rep = Repetition::new(Frequency::Weekly, date(2020, 11, 1));
        rep.set_termination(Termination::after(3).unwrap());
        assert_eq!(rep.last_occurrence(), Some(date(2020, 11, 15)));
        assert!(rep.is_recurring_on(date(2020, 11, 8)));
        assert!(rep.is_recurring_on(date(2020, 11, 15)));
        assert!(!rep.is_recurring_on(date(2020, 11, 22)));
    }

    #[test]
    fn date_termination_matches_last_day_even_off_rhythm() {
        // The end date is a Tuesday while the series runs on Sundays
        let mut rep = Repetition::new(Frequency::Weekly, date(2020, 11, 1));
        rep.set_termination(Termination::until(date(2021, 1, 5)));
        assert!(rep.is_recurring_on(date(2021, 1, 3)));
        assert!(rep.is_recurring_on(date(2021, 1, 5)));
        assert!(!rep.is_recurring_on(date(2021, 1, 10)));
    }

    #[test]
    fn last_termination_wins() {
        let mut rep = Repetition::new(Frequency::Daily, date(2020, 11, 1));
        rep.set_termination(Termination::after(2).unwrap());
        rep.set_termination(Termination::until(date(2020, 11, 5)));
        assert_eq!(rep.termination(), Some(&Termination::until(date(2020, 11, 5))));
        assert!(rep.is_recurring_on(date(2020, 11, 4)));
        assert!(!rep.is_recurring_on(date(2020, 11, 6)));
    }

    #[test]
    fn open_ended_has_no_last_occurrence() {
        let rep = Repetition::new(Frequency::Monthly, date(2020, 11, 15));
        assert_eq!(rep.termination(), None);
        assert_eq!(rep.last_occurrence(), None);
    }
}
