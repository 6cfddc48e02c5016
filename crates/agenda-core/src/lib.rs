//! Core domain logic for the agenda.
//!
//! This crate answers one question: which events occur on a given calendar day.
//! - [`Event`]: a titled span of time, optionally repeating
//! - [`Repetition`]: frequency, skipped dates and an optional end condition
//! - [`Termination`]: an inclusive end date or a number of occurrences
//! - [`Agenda`]: an ordered collection of events with day, title and free-slot queries
//!
//! Dates and times are naive (no time zone). Everything is in-memory and synchronous.

mod agenda;
mod error;
pub mod event;
pub mod frequency;
pub mod repetition;
pub mod termination;

pub use agenda::Agenda;
pub use error::{AgendaError, Result};
pub use event::Event;
pub use frequency::{Frequency, UnknownFrequency};
pub use repetition::Repetition;
pub use termination::Termination;
