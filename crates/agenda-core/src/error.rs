//! Error types for agenda operations.

use thiserror::Error;

/// Errors raised while configuring events and their repetitions.
///
/// Neither variant is transient: the caller has to change the call, not retry it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgendaError {
    /// A count-based termination was requested with fewer than one occurrence.
    #[error("number of occurrences must be positive, got {count}")]
    InvalidArgument { count: i64 },

    /// A termination was attached to an event that does not repeat.
    #[error("cannot set a termination on '{title}' before setting its repetition")]
    InvalidState { title: String },
}

/// Result alias for fallible agenda operations.
pub type Result<T> = std::result::Result<T, AgendaError>;
