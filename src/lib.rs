#![warn(missing_docs)]

//! ClaudeFS queueing subsystem: a multi-priority queueing and scheduling core
//! for traffic shaping and request admission.
//!
//! Callers push payloads tagged with a [`Priority`](priority::Priority) and
//! pull them back out according to a configurable [`Scheduler`] subject to
//! per-queue [`RateLimiter`]s. The crate is single-threaded and
//! unsynchronized by design: every public operation is finite and
//! non-suspending, so callers that need multi-producer/multi-consumer access
//! wrap a [`PriorityQueues`] in their own mutex. See [`queues`] for the
//! concurrency contract in full.

pub mod clock;
pub mod config;
pub mod element;
pub mod error;
pub mod limiter;
pub mod metrics;
pub mod priority;
pub mod queue;
pub mod queues;
pub mod scheduler;

pub use clock::{Clock, SystemClock};
pub use config::{Config, PriorityEndian, SchedulingPolicyKind, WfqConfig};
pub use element::{Element, Payload};
pub use error::{QSchedError, Result};
pub use limiter::RateLimiter;
pub use metrics::{QueueMetrics, QueueMetricsSnapshot};
pub use priority::{Priority, MAX_PRIORITIES, NULL_PRIORITY};
pub use queue::PriorityQueue;
pub use queues::PriorityQueues;
pub use scheduler::{RoundRobin, Scheduler, StrictPriority, WeightedFair};
