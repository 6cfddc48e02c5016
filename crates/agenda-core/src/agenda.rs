//! An ordered collection of events and the queries over it.

use chrono::NaiveDate;

use crate::event::Event;

/// Events in insertion order. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agenda {
    events: Vec<Event>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with an occurrence on `day`, in insertion order.
    pub fn events_in_day(&self, day: NaiveDate) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.is_in_day(day))
    }

    /// Events whose title is exactly `title` (case-sensitive), in insertion order.
    pub fn find_by_title<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.title() == title)
    }

    /// Whether `candidate` fits without overlapping any stored event.
    ///
    /// Intervals are half-open, so back-to-back events do not conflict.
    /// Recurrence is not expanded: each stored event is compared through its
    /// first occurrence only.
    pub fn is_free_for(&self, candidate: &Event) -> bool {
        let (test_start, test_end) = (candidate.start(), candidate.end());
        let conflict = self
            .events
            .iter()
            .find(|existing| test_start < existing.end() && test_end > existing.start());

        if let Some(existing) = conflict {
            tracing::debug!(candidate = %candidate.title(), conflict = %existing.title(), "time slot taken");
            return false;
        }
        true
    }
}

impl FromIterator<Event> for Agenda {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<Event> for Agenda {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}
