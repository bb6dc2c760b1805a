//! The three scheduling disciplines that decide which priority slot yields
//! the next element: Round-Robin, Strict-Priority, and Weighted Fair
//! Queueing.
//!
//! The source couples a scheduler to its container through a raw back-
//! pointer (`Scheduling` holds `PriorityQueues*`). This crate breaks that
//! cycle the same way it breaks the limiter/queue cycle (`DESIGN.md`, Open
//! Question 3): `get_next_priority` takes an eligibility closure supplied by
//! the caller (`PriorityQueues::dequeue`) instead of reaching back into the
//! container itself.

use tracing::trace;

use crate::priority::{Priority, MAX_PRIORITIES};

/// A policy object attached to a [`crate::queues::PriorityQueues`] container
/// that selects which eligible slot serves the next dequeue.
///
/// The set of disciplines is closed (RR, SP, WFQ); this is still expressed
/// as a trait, rather than an enum, so `set_scheduling` can take any
/// `Box<dyn Scheduler>` — matching the source's polymorphic
/// `Scheduling<E, F>*` without needing a matching generic parameter on the
/// scheduler itself (schedulers hold no payload-typed state).
pub trait Scheduler: Send + std::fmt::Debug {
    /// Pure inspection modulo cursor advancement: scans for a slot in
    /// `[0, max_prio)` that `can_dequeue` reports eligible, returning it
    /// and (for RR/WFQ) advancing internal cursor state to that slot.
    /// Returns `None` if no slot in range is eligible.
    fn get_next_priority(
        &mut self,
        max_prio: Priority,
        can_dequeue: &dyn Fn(Priority) -> bool,
    ) -> Option<Priority>;

    /// Bookkeeping hook fired on every successful enqueue at `prio`.
    fn enqueue_trigger(&mut self, prio: Priority);

    /// Bookkeeping hook fired iff a dequeue actually occurred at `prio`.
    ///
    /// `max_prio` is threaded through here (rather than cached from a
    /// back-pointer to the container, as the source does via
    /// `Scheduling::m_max_prio`) so cursor rotation wraps at the container's
    /// configured width, not the fixed `MAX_PRIORITIES` array width.
    fn dequeue_trigger(&mut self, prio: Priority, max_prio: Priority);
}

/// Round-robin: each eligible priority is visited at most once per
/// rotation; a priority starves only if perpetually rate-limited.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    last_prio: Priority,
}

impl RoundRobin {
    /// Creates a round-robin scheduler starting at slot 0.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for RoundRobin {
    fn get_next_priority(
        &mut self,
        max_prio: Priority,
        can_dequeue: &dyn Fn(Priority) -> bool,
    ) -> Option<Priority> {
        if max_prio == 0 {
            return None;
        }
        let mut prio = self.last_prio % max_prio;
        for _ in 0..max_prio {
            if can_dequeue(prio) {
                self.last_prio = prio;
                return Some(prio);
            }
            prio = (prio + 1) % max_prio;
        }
        None
    }

    fn enqueue_trigger(&mut self, _prio: Priority) {}

    fn dequeue_trigger(&mut self, prio: Priority, max_prio: Priority) {
        debug_assert_eq!(prio, self.last_prio, "RR dequeue_trigger for wrong slot");
        debug_assert!(max_prio > 0, "RR dequeue_trigger with max_prio == 0");
        self.last_prio = (self.last_prio + 1) % max_prio;
        trace!(next = self.last_prio, "rr advanced");
    }
}

/// Strict priority: stateless, always serves the lowest-numbered eligible
/// slot. Higher-numbered (lower-precedence) queues may starve indefinitely
/// under sustained load at a higher priority — this is by design.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictPriority;

impl StrictPriority {
    /// Creates a strict-priority scheduler.
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for StrictPriority {
    fn get_next_priority(
        &mut self,
        max_prio: Priority,
        can_dequeue: &dyn Fn(Priority) -> bool,
    ) -> Option<Priority> {
        (0..max_prio).find(|&prio| can_dequeue(prio))
    }

    fn enqueue_trigger(&mut self, _prio: Priority) {}
    fn dequeue_trigger(&mut self, _prio: Priority, _max_prio: Priority) {}
}

/// Per-slot service quantum for [`WeightedFair`]. A slot with token value 0
/// is skipped entirely rather than serviced zero-then-rotate, which is what
/// the source's unconditional `tokens[i] == 0` comparison would have done
/// (see `SPEC_FULL.md` §9 / source-bug note).
pub type WfqTokens = [u8; MAX_PRIORITIES];

/// Weighted fair queueing: rotates like round-robin but serves up to
/// `tokens[i]` consecutive items from slot `i` before advancing. When all
/// slots are saturated the long-run service ratio approaches
/// `tokens[i] / sum(tokens)`.
#[derive(Debug, Clone)]
pub struct WeightedFair {
    last_prio: Priority,
    last_token: u8,
    tokens: WfqTokens,
}

impl WeightedFair {
    /// Creates a WFQ scheduler with the given per-slot token allotments.
    /// A token value of 0 means that slot is skipped by the scheduler.
    pub fn new(tokens: WfqTokens) -> Self {
        Self {
            last_prio: 0,
            last_token: 0,
            tokens,
        }
    }

    /// Replaces the token allotments in place.
    pub fn set_tokens(&mut self, tokens: WfqTokens) {
        self.tokens = tokens;
    }
}

impl Scheduler for WeightedFair {
    fn get_next_priority(
        &mut self,
        max_prio: Priority,
        can_dequeue: &dyn Fn(Priority) -> bool,
    ) -> Option<Priority> {
        if max_prio == 0 {
            return None;
        }
        let mut prio = self.last_prio % max_prio;
        for _ in 0..max_prio {
            if self.tokens[prio as usize] != 0 && can_dequeue(prio) {
                self.last_prio = prio;
                return Some(prio);
            }
            prio = (prio + 1) % max_prio;
        }
        None
    }

    fn enqueue_trigger(&mut self, _prio: Priority) {}

    fn dequeue_trigger(&mut self, prio: Priority, max_prio: Priority) {
        debug_assert_eq!(prio, self.last_prio, "WFQ dequeue_trigger for wrong slot");
        debug_assert!(max_prio > 0, "WFQ dequeue_trigger with max_prio == 0");
        self.last_token += 1;
        if self.last_token >= self.tokens[self.last_prio as usize] {
            self.last_token = 0;
            self.last_prio = (self.last_prio + 1) % max_prio;
        }
        trace!(
            next = self.last_prio,
            token = self.last_token,
            "wfq advanced"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_eligible(_p: Priority) -> bool {
        true
    }

    #[test]
    fn rr_rotation_law() {
        let mut rr = RoundRobin::new();
        let mut served = Vec::new();
        for _ in 0..9 {
            let p = rr.get_next_priority(3, &all_eligible).unwrap();
            rr.dequeue_trigger(p, 3);
            served.push(p);
        }
        // Every window of 3 consecutive dequeues serves each slot once.
        for window in served.chunks(3) {
            let mut sorted = window.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2]);
        }
    }

    #[test]
    fn sp_dominance_law() {
        let mut sp = StrictPriority::new();
        let eligible = |p: Priority| p == 0 || p == 2;
        assert_eq!(sp.get_next_priority(3, &eligible), Some(0));
    }

    #[test]
    fn sp_scans_to_lowest_numbered_eligible() {
        let mut sp = StrictPriority::new();
        let eligible = |p: Priority| p == 2;
        assert_eq!(sp.get_next_priority(3, &eligible), Some(2));
    }

    #[test]
    fn sp_none_when_nothing_eligible() {
        let mut sp = StrictPriority::new();
        assert_eq!(sp.get_next_priority(3, &|_p| false), None);
    }

    #[test]
    fn wfq_ratio_law() {
        let mut wfq = WeightedFair::new([3, 1, 0, 0, 0, 0, 0, 0]);
        let mut served = Vec::new();
        for _ in 0..16 {
            let p = wfq.get_next_priority(2, &all_eligible).unwrap();
            wfq.dequeue_trigger(p, 2);
            served.push(p);
        }
        for window in served.chunks(4) {
            let zeros = window.iter().filter(|&&p| p == 0).count();
            let ones = window.iter().filter(|&&p| p == 1).count();
            assert_eq!(zeros, 3);
            assert_eq!(ones, 1);
        }
    }

    #[test]
    fn wfq_zero_token_slot_is_skipped() {
        let mut wfq = WeightedFair::new([0, 1, 0, 0, 0, 0, 0, 0]);
        for _ in 0..5 {
            let p = wfq.get_next_priority(2, &all_eligible).unwrap();
            assert_eq!(p, 1, "slot 0 has zero tokens and must never be chosen");
            wfq.dequeue_trigger(p, 2);
        }
    }

    #[test]
    fn rr_none_when_max_prio_zero() {
        let mut rr = RoundRobin::new();
        assert_eq!(rr.get_next_priority(0, &all_eligible), None);
    }
}
