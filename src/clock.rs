//! Monotonic microsecond clock used by rate limiters.
//!
//! This crate never reads the system clock itself outside of
//! [`SystemClock`]; every other component that needs "now" takes a `&dyn
//! Clock` so tests can supply a deterministic fake.

use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic microsecond time source.
///
/// Implementations must be non-decreasing across calls within one process.
/// This crate does not require wall-clock accuracy, only monotonicity: a
/// limiter's `available_time()` math depends on deltas between calls, not
/// on the absolute value meaning anything outside the process.
pub trait Clock: Send + Sync {
    /// Returns the current time in microseconds since some fixed epoch.
    fn now_micros(&self) -> u64;
}

/// Default [`Clock`] backed by `SystemTime`, microseconds since the Unix
/// epoch. Saturates to `0` if the system clock is set before the epoch
/// rather than panicking.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}
