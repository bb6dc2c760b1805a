//! A single priority level's FIFO, gated by an ordered list of rate
//! limiters.

use std::collections::VecDeque;

use tracing::trace;

use crate::element::{Element, Payload};
use crate::limiter::RateLimiter;
use crate::priority::Priority;

/// FIFO of [`Element<P>`] at one priority level, gated by zero or more
/// [`RateLimiter`]s.
///
/// Invariants maintained across every operation below: `size()` equals the
/// sum of `byte_size()` over live elements, and `length()` equals the FIFO's
/// length. FIFO order is strictly insertion order.
pub struct PriorityQueue<P> {
    priority: Priority,
    elements: VecDeque<Element<P>>,
    limiters: Vec<Box<dyn RateLimiter<P>>>,
    size: u64,
}

impl<P: Payload> PriorityQueue<P> {
    /// Creates an empty queue for the given priority slot.
    pub fn new(priority: Priority) -> Self {
        Self {
            priority,
            elements: VecDeque::new(),
            limiters: Vec::new(),
            size: 0,
        }
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// This queue's priority slot.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Appends a rate limiter to this queue's limiter list. Trigger order
    /// on subsequent enqueue/dequeue calls follows append order.
    pub fn add_rate_limiter(&mut self, limiter: Box<dyn RateLimiter<P>>) {
        self.limiters.push(limiter);
    }

    /// Appends `element`, fires `enqueue_trigger` on every limiter in
    /// order, and adds the element's size to the cumulative total.
    pub fn enqueue(&mut self, element: Element<P>) {
        for limiter in &mut self.limiters {
            limiter.enqueue_trigger(&element);
        }
        self.size += element.size();
        self.elements.push_back(element);
        trace!(priority = self.priority, size = self.size, "enqueued");
    }

    /// True iff the FIFO is non-empty and no limiter reports `is_limited`.
    pub fn can_dequeue(&self) -> bool {
        !self.elements.is_empty() && self.limiters.iter().all(|l| !l.is_limited())
    }

    /// Pops the head element, fires `dequeue_trigger` on every limiter in
    /// order, and subtracts the element's size from the cumulative total.
    ///
    /// # Panics (debug builds only)
    /// Panics via `debug_assert!` if the queue is empty or if the
    /// cumulative size would underflow — both are programmer errors per
    /// `SPEC_FULL.md` §4.6, not runtime conditions callers should handle.
    pub fn dequeue(&mut self) -> Element<P> {
        debug_assert!(!self.elements.is_empty(), "dequeue on empty PriorityQueue");
        let element = self.elements.pop_front().expect("checked non-empty above");

        for limiter in &mut self.limiters {
            limiter.dequeue_trigger(&element);
        }

        let popped_size = element.size();
        debug_assert!(
            self.size >= popped_size,
            "PriorityQueue size underflow: size={} popped={}",
            self.size,
            popped_size
        );
        self.size = self.size.saturating_sub(popped_size);
        trace!(priority = self.priority, size = self.size, "dequeued");
        element
    }

    /// Minimum [`RateLimiter::available_time`] over all limiters, or
    /// `u64::MAX` if this queue has no limiters.
    pub fn available_time(&self) -> u64 {
        self.limiters
            .iter()
            .map(|l| l.available_time())
            .min()
            .unwrap_or(u64::MAX)
    }

    /// Cumulative byte size of live elements.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of live elements.
    pub fn length(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limiter::test_support::{Switch, Unlimited};

    #[derive(Debug, Clone)]
    struct Bytes(u64);
    impl Payload for Bytes {
        fn byte_size(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn fifo_order_preserved() {
        let mut q: PriorityQueue<Bytes> = PriorityQueue::new(0);
        q.enqueue(Element::new(0, Bytes(1)));
        q.enqueue(Element::new(0, Bytes(2)));
        q.enqueue(Element::new(0, Bytes(3)));

        assert_eq!(q.dequeue().payload().0, 1);
        assert_eq!(q.dequeue().payload().0, 2);
        assert_eq!(q.dequeue().payload().0, 3);
    }

    #[test]
    fn size_accounting_scenario_4() {
        let mut q: PriorityQueue<Bytes> = PriorityQueue::new(0);
        q.enqueue(Element::new(0, Bytes(10)));
        assert_eq!(q.size(), 10);
        q.enqueue(Element::new(0, Bytes(20)));
        assert_eq!(q.size(), 30);
        q.enqueue(Element::new(0, Bytes(5)));
        assert_eq!(q.size(), 35);

        q.dequeue();
        q.dequeue();
        assert_eq!(q.size(), 5);
    }

    #[test]
    fn can_dequeue_without_limiters_tracks_emptiness() {
        let mut q: PriorityQueue<Bytes> = PriorityQueue::new(0);
        assert!(!q.can_dequeue());
        q.enqueue(Element::new(0, Bytes(1)));
        assert!(q.can_dequeue());
        q.dequeue();
        assert!(!q.can_dequeue());
    }

    #[test]
    fn rate_limit_gating_scenario_5() {
        let mut q: PriorityQueue<Bytes> = PriorityQueue::new(0);
        q.add_rate_limiter(Box::new(Switch {
            limited: true,
            available_at: 1000,
        }));
        q.enqueue(Element::new(0, Bytes(1)));

        assert!(!q.can_dequeue());
        assert_eq!(q.available_time(), 1000);
    }

    #[test]
    fn available_time_with_no_limiters_is_max() {
        let q: PriorityQueue<Bytes> = PriorityQueue::new(0);
        assert_eq!(q.available_time(), u64::MAX);
    }

    #[test]
    fn any_limiter_limited_blocks_dequeue() {
        let mut q: PriorityQueue<Bytes> = PriorityQueue::new(0);
        q.add_rate_limiter(Box::new(Unlimited));
        q.add_rate_limiter(Box::new(Switch {
            limited: true,
            available_at: 5,
        }));
        q.enqueue(Element::new(0, Bytes(1)));
        assert!(!q.can_dequeue());
    }
}
