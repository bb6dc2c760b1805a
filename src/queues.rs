//! The fixed-width container of eight [`PriorityQueue`]s plus the attached
//! [`Scheduler`] that arbitrates between them.
//!
//! **Concurrency contract**: this container is not internally synchronized.
//! Every operation below — `enqueue`, `dequeue`, `available_time`, size
//! queries, `set_scheduling` — must be serialized by the caller. No
//! operation blocks, sleeps, or suspends; `available_time()` is a query the
//! caller uses to schedule its own wait. Wrap the container in a `Mutex` if
//! multiple producers/consumers need access; every public method here is
//! finite and non-suspending, so the contract holds under such a wrapper.

use tracing::{debug, trace, warn};

use crate::config::{Config, SchedulingPolicyKind};
use crate::element::{Element, Payload};
use crate::error::{QSchedError, Result};
use crate::metrics::{QueueMetrics, QueueMetricsSnapshot};
use crate::priority::{Priority, MAX_PRIORITIES};
use crate::queue::PriorityQueue;
use crate::scheduler::{RoundRobin, Scheduler, StrictPriority, WeightedFair};

/// Owns exactly [`MAX_PRIORITIES`] [`PriorityQueue`]s indexed by priority
/// and exactly one [`Scheduler`], and mirrors aggregate size/length across
/// the child queues.
pub struct PriorityQueues<P> {
    queues: [PriorityQueue<P>; MAX_PRIORITIES],
    scheduler: Box<dyn Scheduler>,
    max_prio: Priority,
    size: u64,
    length: usize,
    metrics: QueueMetrics,
}

impl<P: Payload> PriorityQueues<P> {
    /// Creates a container with `max_prio` active priority slots (`1..=8`),
    /// attaching `scheduler` as the initial scheduling discipline.
    ///
    /// All [`MAX_PRIORITIES`] slots are always allocated regardless of
    /// `max_prio`; slots at or beyond `max_prio` simply stay dormant — see
    /// `SPEC_FULL.md` §9. `max_prio` beyond 8 is a programmer error
    /// (`debug_assert!`); release builds saturate to 8 instead of reading
    /// out of bounds.
    pub fn new(max_prio: Priority, scheduler: Box<dyn Scheduler>) -> Self {
        debug_assert!(
            max_prio as usize <= MAX_PRIORITIES,
            "max_prio {} exceeds MAX_PRIORITIES {}",
            max_prio,
            MAX_PRIORITIES
        );
        let max_prio = max_prio.min(MAX_PRIORITIES as Priority);
        warn_if_degenerate(max_prio);

        let mut idx: Priority = 0;
        let queues = std::array::from_fn(|_| {
            let q = PriorityQueue::new(idx);
            idx += 1;
            q
        });

        Self {
            queues,
            scheduler,
            max_prio,
            size: 0,
            length: 0,
            metrics: QueueMetrics::new(),
        }
    }

    /// Builds a container directly from a [`Config`], constructing and
    /// attaching whichever [`Scheduler`] the config names.
    pub fn from_config(config: &Config) -> Self {
        let scheduler: Box<dyn Scheduler> = match config.scheduling_policy {
            SchedulingPolicyKind::RoundRobin => Box::new(RoundRobin::new()),
            SchedulingPolicyKind::StrictPriority => Box::new(StrictPriority::new()),
            SchedulingPolicyKind::WeightedFair => Box::new(WeightedFair::new(config.wfq.tokens)),
        };
        Self::new(config.max_prio, scheduler)
    }

    /// The number of active priority slots. Valid enqueue priorities are
    /// `0..max_prio` (exclusive); `max_prio` itself and beyond are
    /// rejected. See `DESIGN.md`, Open Question 6, for why this crate uses
    /// `>=` here rather than the source's `prio > m_max_prio` check: with
    /// `max_prio == MAX_PRIORITIES` the source's `>` check would accept a
    /// priority equal to the array width and index out of bounds.
    pub fn max_prio(&self) -> Priority {
        self.max_prio
    }

    /// Replaces the attached scheduler. The prior scheduler is dropped.
    /// Must not be called while a dequeue is logically "in progress" from
    /// the caller's point of view — the container has no internal state
    /// that would corrupt, but scheduler cursor state from the old
    /// scheduler is lost, which is the whole point of replacement.
    pub fn set_scheduling(&mut self, scheduler: Box<dyn Scheduler>) {
        debug!("replacing scheduler");
        self.scheduler = scheduler;
    }

    /// Borrows the child queue at `prio`, for wiring rate limiters onto it.
    ///
    /// # Panics
    /// Panics if `prio >= MAX_PRIORITIES`.
    pub fn get_queue(&mut self, prio: Priority) -> &mut PriorityQueue<P> {
        &mut self.queues[prio as usize]
    }

    /// Enqueues `payload` at `prio`. Fires the scheduler's `enqueue_trigger`
    /// before the child queue observes the element, per `SPEC_FULL.md`
    /// §4.4 (this also resolves the source's rvalue/non-rvalue enqueue-path
    /// inconsistency called out in `SPEC_FULL.md` §9: every successful
    /// enqueue fires the trigger here, with no split code path).
    ///
    /// Returns [`QSchedError::InvalidPriority`] and leaves all state
    /// unchanged if `prio >= max_prio`.
    pub fn enqueue(&mut self, prio: Priority, payload: P) -> Result<()> {
        self.enqueue_element(prio, Element::new(prio, payload))
    }

    /// As [`Self::enqueue`], but takes a pre-built [`Element`] (its
    /// priority field is ignored in favor of `prio`, mirroring the source's
    /// `Enqueue(Priority, const Element&)` overload).
    pub fn enqueue_element(&mut self, prio: Priority, element: Element<P>) -> Result<()> {
        if prio >= self.max_prio {
            self.metrics.record_rejected();
            return Err(QSchedError::InvalidPriority {
                requested: prio,
                max_prio: self.max_prio,
            });
        }

        self.scheduler.enqueue_trigger(prio);
        let size = element.size();
        self.queues[prio as usize].enqueue(element);
        self.size += size;
        self.length += 1;
        self.metrics.record_enqueue(prio as usize);
        trace!(prio, total_length = self.length, "container enqueued");
        Ok(())
    }

    /// Asks the scheduler which priority to serve next and, if one is
    /// eligible, pops and returns its head element. Returns `None` if no
    /// slot is currently eligible (the source's `NULL_PRIORITY` sentinel
    /// element, re-expressed idiomatically — see `SPEC_FULL.md` §3).
    pub fn dequeue(&mut self) -> Option<Element<P>> {
        let queues = &self.queues;
        let max_prio = self.max_prio;
        let next_prio = self
            .scheduler
            .get_next_priority(max_prio, &|p| queues[p as usize].can_dequeue());

        let prio = next_prio?;
        let element = self.queues[prio as usize].dequeue();
        self.scheduler.dequeue_trigger(prio, max_prio);

        let size = element.size();
        debug_assert!(
            self.size >= size,
            "aggregate size underflow: size={} popped={}",
            self.size,
            size
        );
        self.size = self.size.saturating_sub(size);
        self.length = self.length.saturating_sub(1);
        self.metrics.record_dequeue(prio as usize);
        trace!(prio, total_length = self.length, "container dequeued");
        Some(element)
    }

    /// Minimum [`PriorityQueue::available_time`] over all child queues.
    /// `u64::MAX` if every queue has no limiters (or `MAX_PRIORITIES` is
    /// somehow zero, which cannot happen in practice).
    pub fn available_time(&self) -> u64 {
        self.queues
            .iter()
            .map(|q| q.available_time())
            .min()
            .unwrap_or(u64::MAX)
    }

    /// Aggregate byte size across all child queues.
    pub fn queuing_size(&self) -> u64 {
        self.size
    }

    /// Aggregate element count across all child queues.
    pub fn queuing_length(&self) -> usize {
        self.length
    }

    /// Byte size of the single child queue at `prio`.
    ///
    /// # Panics
    /// Panics if `prio >= MAX_PRIORITIES`.
    pub fn queuing_size_at(&self, prio: Priority) -> u64 {
        self.queues[prio as usize].size()
    }

    /// Element count of the single child queue at `prio`.
    ///
    /// # Panics
    /// Panics if `prio >= MAX_PRIORITIES`.
    pub fn queuing_length_at(&self, prio: Priority) -> usize {
        self.queues[prio as usize].length()
    }

    /// Point-in-time snapshot of enqueue/dequeue/rejection counters across
    /// this container's lifetime.
    pub fn metrics(&self) -> QueueMetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<P: Payload> std::fmt::Debug for PriorityQueues<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityQueues")
            .field("max_prio", &self.max_prio)
            .field("size", &self.size)
            .field("length", &self.length)
            .finish()
    }
}

/// Logs a warning the first time a container is constructed with
/// `max_prio == 0`; such a container can never enqueue or dequeue
/// anything, which is almost always a configuration mistake even though it
/// is not an error per `SPEC_FULL.md` §7.
pub(crate) fn warn_if_degenerate(max_prio: Priority) {
    if max_prio == 0 {
        warn!("PriorityQueues constructed with max_prio == 0; no slot will ever be usable");
    }
}
