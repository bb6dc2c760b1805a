//! Priority slot numbering shared by every other module in this crate.
//!
//! Lower numeric value is higher precedence ("low-is-high"), the only
//! direction this crate implements — see `SPEC_FULL.md` §9 for why the
//! alternate endian is not wired up.

/// A priority slot index in `[0, MAX_PRIORITIES)`.
///
/// Lower values are served first under [`crate::scheduler::StrictPriority`]
/// and are the baseline direction for [`crate::scheduler::RoundRobin`] and
/// [`crate::scheduler::WeightedFair`] as well.
pub type Priority = u8;

/// Fixed compile-time width of the priority space. `PriorityQueues` always
/// allocates this many child queues regardless of the configured
/// `max_prio`; slots at or beyond `max_prio` simply stay dormant.
pub const MAX_PRIORITIES: usize = 8;

/// Sentinel value denoting "no eligible queue". Kept as a public constant
/// for callers that want the raw C-style sentinel; internally this crate
/// prefers `Option<Priority>` (see `SPEC_FULL.md` Data Model / Open
/// Question 1 in `DESIGN.md`).
pub const NULL_PRIORITY: Priority = Priority::MAX;
