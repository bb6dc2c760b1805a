//! Error types for the queueing and scheduling core.

use thiserror::Error;

use crate::priority::Priority;

/// The only runtime error this crate raises. Everything else is either a
/// normal "no item" result (`Option::None`) or a `debug_assert!`-guarded
/// programmer error (see the crate-level docs and `SPEC_FULL.md` §7).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QSchedError {
    /// `enqueue` was called with a priority beyond the configured `max_prio`.
    #[error("invalid priority {requested}: max configured priority is {max_prio}")]
    InvalidPriority {
        /// The priority the caller requested.
        requested: Priority,
        /// The container's configured maximum priority.
        max_prio: Priority,
    },
}

/// Result type alias for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, QSchedError>;
