//! Lock-free bounded counters: the escalation counter and the counting
//! event that hands each accepted excursion to the aggregator.
//!
//! Both are a single `AtomicU32` updated with `fetch_update`, so a
//! read-modify-write from the Sampling Task can never lose an update made
//! concurrently by the Alert Aggregator (or vice versa).  Neither type
//! ever blocks the caller.

use core::sync::atomic::{AtomicU32, Ordering};

/// Atomic count clamped to `[0, bound]`.
struct Bounded {
    value: AtomicU32,
    bound: u32,
}

impl Bounded {
    const fn new(bound: u32) -> Self {
        Self {
            value: AtomicU32::new(0),
            bound,
        }
    }

    /// Add one unless already at the bound.  Returns the previous value on
    /// success.
    fn up(&self) -> Option<u32> {
        self.value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                (v < self.bound).then_some(v + 1)
            })
            .ok()
    }

    /// Subtract one unless already zero.  Returns the previous value on
    /// success.
    fn down(&self) -> Option<u32> {
        self.value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| v.checked_sub(1))
            .ok()
    }

    fn get(&self) -> u32 {
        self.value.load(Ordering::Acquire)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Escalation counter
// ═══════════════════════════════════════════════════════════════

/// Shared severity level, bounded in `[0, max]`.
///
/// Only the Sampling Task increments it and only the Alert Aggregator
/// decrements it.  Incrementing at `max` is a no-op, not an error.
pub struct EscalationCounter {
    inner: Bounded,
}

impl EscalationCounter {
    pub const fn new(max: u32) -> Self {
        Self {
            inner: Bounded::new(max),
        }
    }

    /// Returns `false` when the counter was already saturated.
    pub fn try_increment(&self) -> bool {
        self.inner.up().is_some()
    }

    /// Decrement and return the level *before* the decrement, or `None`
    /// if the counter was already zero.
    pub fn decrement(&self) -> Option<u32> {
        self.inner.down()
    }

    pub fn get(&self) -> u32 {
        self.inner.get()
    }

    pub fn max(&self) -> u32 {
        self.inner.bound
    }

    pub fn is_saturated(&self) -> bool {
        self.get() >= self.inner.bound
    }
}

// ═══════════════════════════════════════════════════════════════
//  Counting event
// ═══════════════════════════════════════════════════════════════

/// Counting semaphore with a fixed capacity.  Each permit is one
/// escalation the aggregator has not consumed yet.
///
/// `give` at capacity is absorbed (returns `false`) rather than blocking
/// the producer.
pub struct CountingEvent {
    permits: Bounded,
}

impl CountingEvent {
    pub const fn new(capacity: u32) -> Self {
        Self {
            permits: Bounded::new(capacity),
        }
    }

    pub fn give(&self) -> bool {
        self.permits.up().is_some()
    }

    /// Non-blocking take.  `true` means one permit was consumed.
    pub fn try_take(&self) -> bool {
        self.permits.down().is_some()
    }

    pub fn pending(&self) -> u32 {
        self.permits.get()
    }

    pub fn capacity(&self) -> u32 {
        self.permits.bound
    }
}
