//! Queue-level metrics, ambient observability carried over from the host
//! crate's `priority.rs` (`PriorityStats`/`PriorityStatsSnapshot`) and
//! `metrics.rs` (`TransportMetrics`) conventions: lock-free atomics behind a
//! snapshot type, no starvation counter (RR/WFQ starvation here is
//! structural, bounded by the rotation itself, not a threshold to alarm on;
//! SP starvation is by design, not an anomaly — see `SPEC_FULL.md` §9).

use std::sync::atomic::{AtomicU64, Ordering};

use crate::priority::MAX_PRIORITIES;

/// Thread-safe counters for enqueue/dequeue/rejection activity across all
/// priority slots. Callers that do serialize access through an external
/// mutex (per `SPEC_FULL.md` §5) can still read these from another thread
/// for reporting, which is why they're atomics rather than plain counters.
#[derive(Debug, Default)]
pub struct QueueMetrics {
    enqueued: [AtomicU64; MAX_PRIORITIES],
    dequeued: [AtomicU64; MAX_PRIORITIES],
    rejected: AtomicU64,
}

/// Point-in-time snapshot of [`QueueMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueMetricsSnapshot {
    /// Enqueued counts per priority slot.
    pub enqueued: [u64; MAX_PRIORITIES],
    /// Dequeued counts per priority slot.
    pub dequeued: [u64; MAX_PRIORITIES],
    /// Total rejected enqueues (`InvalidPriority`).
    pub rejected: u64,
}

impl QueueMetrics {
    /// Creates a zeroed metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful enqueue at `prio`.
    pub fn record_enqueue(&self, prio: usize) {
        self.enqueued[prio].fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful dequeue at `prio`.
    pub fn record_dequeue(&self, prio: usize) {
        self.dequeued[prio].fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rejected enqueue (invalid priority).
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> QueueMetricsSnapshot {
        let mut enqueued = [0u64; MAX_PRIORITIES];
        let mut dequeued = [0u64; MAX_PRIORITIES];
        for i in 0..MAX_PRIORITIES {
            enqueued[i] = self.enqueued[i].load(Ordering::Relaxed);
            dequeued[i] = self.dequeued[i].load(Ordering::Relaxed);
        }
        QueueMetricsSnapshot {
            enqueued,
            dequeued,
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_slot() {
        let metrics = QueueMetrics::new();
        metrics.record_enqueue(0);
        metrics.record_enqueue(0);
        metrics.record_enqueue(2);
        metrics.record_dequeue(0);
        metrics.record_rejected();

        let snap = metrics.snapshot();
        assert_eq!(snap.enqueued[0], 2);
        assert_eq!(snap.enqueued[2], 1);
        assert_eq!(snap.dequeued[0], 1);
        assert_eq!(snap.rejected, 1);
    }
}
