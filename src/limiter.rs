//! The abstract rate-limiter contract a `PriorityQueue` gates dispatch on.
//!
//! Concrete limiter algorithms (token-bucket, leaky-bucket, sliding-window)
//! are out of scope for this crate — it defines only the contract a
//! host-supplied limiter must honor. `tests/` carries a couple of trivial
//! fakes used to exercise the contract, not production limiters.

use crate::element::{Element, Payload};

/// A policy object attached to one [`crate::queue::PriorityQueue`] that may
/// veto dispatch and report an earliest-unblock time.
///
/// `is_limited` is a disjunction across a queue's limiter list: any limiter
/// reporting `true` forbids dispatch from that queue. Limiter order is
/// significant only for trigger side-effect ordering, never for the
/// `is_limited` disjunction itself.
///
/// The source's `set_queue` back-pointer from limiter to owning queue is
/// dropped entirely (see `DESIGN.md`, Open Question 3): nothing in this
/// trait's operation set needs the limiter to reach back into its queue,
/// and keeping the pointer would recreate an ownership cycle (the queue
/// owns its limiters; a back-pointer would have the limiter point back at
/// its owner) for no behavioral benefit.
pub trait RateLimiter<P: Payload>: Send {
    /// True iff the owning queue is currently forbidden from dispatching.
    /// Must be cheap (O(1) expected) and must not mutate anything beyond
    /// internal bookkeeping consistent with the clock.
    fn is_limited(&self) -> bool;

    /// Observes that `element` was just appended to the owning queue.
    fn enqueue_trigger(&mut self, element: &Element<P>);

    /// Observes that `element` was just popped from the owning queue.
    fn dequeue_trigger(&mut self, element: &Element<P>);

    /// Earliest clock timestamp (microseconds) at which `is_limited` could
    /// become `false` without a further dequeue. `u64::MAX` means "unknown
    /// or never, given current inputs". Must be monotone with respect to
    /// the clock: repeated calls at the same clock value return the same
    /// answer unless an enqueue or dequeue intervened.
    fn available_time(&self) -> u64;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A limiter that never limits. Used to exercise queues/containers with
    /// no real rate-limiting in play.
    #[derive(Debug, Default)]
    pub struct Unlimited;

    impl<P: Payload> RateLimiter<P> for Unlimited {
        fn is_limited(&self) -> bool {
            false
        }
        fn enqueue_trigger(&mut self, _element: &Element<P>) {}
        fn dequeue_trigger(&mut self, _element: &Element<P>) {}
        fn available_time(&self) -> u64 {
            u64::MAX
        }
    }

    /// A limiter whose `is_limited`/`available_time` are toggled directly
    /// by the test, to exercise gating and `PriorityQueues::available_time`.
    #[derive(Debug)]
    pub struct Switch {
        pub limited: bool,
        pub available_at: u64,
    }

    impl<P: Payload> RateLimiter<P> for Switch {
        fn is_limited(&self) -> bool {
            self.limited
        }
        fn enqueue_trigger(&mut self, _element: &Element<P>) {}
        fn dequeue_trigger(&mut self, _element: &Element<P>) {}
        fn available_time(&self) -> u64 {
            if self.limited {
                self.available_at
            } else {
                u64::MAX
            }
        }
    }
}
