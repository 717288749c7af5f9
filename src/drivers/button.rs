//! ISR side of the button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The GPIO fires on the
//! falling edge; the ISR only stamps the edge time into an [`EdgeLatch`]
//! (lock-free, no allocation, no waker) and returns.  Debounce and the
//! hand-off to the handler happen in the capture task
//! ([`LatchCapture`](crate::tasks::capture::LatchCapture)).

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Single-slot edge record written from interrupt context.
///
/// While an edge is pending, further edges are ignored: the earliest edge
/// of a bounce burst is the one the debouncer should see.
pub struct EdgeLatch {
    stamp_ms: AtomicU32,
    pending: AtomicBool,
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            stamp_ms: AtomicU32::new(0),
            pending: AtomicBool::new(false),
        }
    }

    /// Record a falling edge.  Safe to call from interrupt context.
    pub fn on_falling_edge(&self, now_ms: u32) {
        if self.pending.load(Ordering::Acquire) {
            return;
        }
        self.stamp_ms.store(now_ms, Ordering::Relaxed);
        self.pending.store(true, Ordering::Release);
    }

    /// Consume the pending edge, returning its timestamp.  Single consumer.
    ///
    /// The stamp is read while `pending` is still set, so the ISR cannot
    /// overwrite it; only the final store re-arms the latch.
    pub fn take(&self) -> Option<u32> {
        if !self.pending.load(Ordering::Acquire) {
            return None;
        }
        let stamp = self.stamp_ms.load(Ordering::Relaxed);
        self.pending.store(false, Ordering::Release);
        Some(stamp)
    }
}

/// Latch fed by the button GPIO interrupt.
pub static BUTTON_LATCH: EdgeLatch = EdgeLatch::new();

/// ISR handler: register this on the button GPIO falling edge.
pub fn button_isr_handler(now_ms: u32) {
    BUTTON_LATCH.on_falling_edge(now_ms);
}
