//! Configuration surface for a [`crate::queues::PriorityQueues`] container:
//! how many priority slots are active, which scheduling discipline runs,
//! and (for WFQ) the per-slot token allotment.
//!
//! Mirrors `RateLimitConfig`/`QosConfig` in the host crate's `ratelimit.rs`
//! and `qos.rs`: a plain, serializable struct with a `Default` impl, no
//! file-format parsing layered on top (the host's transport subsystem
//! doesn't load these from disk either — callers build them in code or
//! deserialize them as part of their own larger config document).

use serde::{Deserialize, Serialize};

use crate::priority::{Priority, MAX_PRIORITIES};
use crate::scheduler::WfqTokens;

/// Which numeric direction is "higher priority".
///
/// Only [`PriorityEndian::LowIsHigh`] is implemented; this crate's
/// scheduler and queue code assumes it everywhere. The variant exists so
/// callers that serialize this config can round-trip the field, and so a
/// future `BigIsHigh` implementation has a documented slot to land in (see
/// `DESIGN.md`, Open Question 4) — it is deliberately not wired to any
/// behavior today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityEndian {
    /// Lower numeric priority value is served first. The only implemented
    /// direction.
    LowIsHigh,
    /// Higher numeric priority value is served first. Reserved, not
    /// implemented.
    BigIsHigh,
}

impl Default for PriorityEndian {
    fn default() -> Self {
        PriorityEndian::LowIsHigh
    }
}

/// Which scheduling discipline to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingPolicyKind {
    /// Round-robin across eligible slots.
    RoundRobin,
    /// Strict priority: always serve the lowest-numbered eligible slot.
    StrictPriority,
    /// Weighted fair queueing with per-slot token allotments.
    WeightedFair,
}

/// Per-slot token allotment for [`SchedulingPolicyKind::WeightedFair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WfqConfig {
    /// Service quantum for each of the `MAX_PRIORITIES` slots. A value of
    /// 0 means that slot is skipped by the scheduler entirely.
    pub tokens: WfqTokens,
}

impl Default for WfqConfig {
    fn default() -> Self {
        // Equal weight across every slot by default.
        Self {
            tokens: [1; MAX_PRIORITIES],
        }
    }
}

/// Top-level configuration for a [`crate::queues::PriorityQueues`]
/// container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of active priority slots, `1..=MAX_PRIORITIES`.
    pub max_prio: Priority,
    /// Priority direction. See [`PriorityEndian`].
    pub priority_endian: PriorityEndian,
    /// Which scheduling discipline to attach.
    pub scheduling_policy: SchedulingPolicyKind,
    /// Token allotments, consulted only when `scheduling_policy` is
    /// [`SchedulingPolicyKind::WeightedFair`].
    pub wfq: WfqConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_prio: MAX_PRIORITIES as Priority,
            priority_endian: PriorityEndian::LowIsHigh,
            scheduling_policy: SchedulingPolicyKind::StrictPriority,
            wfq: WfqConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_strict_priority_low_is_high() {
        let cfg = Config::default();
        assert_eq!(cfg.max_prio, MAX_PRIORITIES as Priority);
        assert_eq!(cfg.priority_endian, PriorityEndian::LowIsHigh);
        assert_eq!(cfg.scheduling_policy, SchedulingPolicyKind::StrictPriority);
    }

    #[test]
    fn wfq_config_round_trips_through_json() {
        let cfg = WfqConfig {
            tokens: [3, 1, 0, 0, 0, 0, 0, 0],
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: WfqConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
