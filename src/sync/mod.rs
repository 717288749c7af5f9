//! Shared synchronization state.
//!
//! Every primitive the tasks coordinate through lives in one [`Shared`]
//! value, built before any task is spawned and handed to each task as an
//! `Arc`.  There are no ambient globals apart from the ISR latch in
//! [`drivers::button`](crate::drivers::button).
//!
//! ```text
//!  Sampling ──▶ counter ▲ / escalations ▲ / payloads ──▶ Aggregator ──┐
//!                                                                    ├─▶ output ─▶ sink
//!  Capture  ──▶ button (binary) ──▶ Handler ── suppression ─────────┘
//! ```

mod channel;
mod counter;
mod guard;
mod signal;

use core::sync::atomic::{AtomicBool, Ordering};

use crate::app::ports::ReportSink;
use crate::config::CoordinatorConfig;

pub use channel::AuxChannel;
pub use counter::{CountingEvent, EscalationCounter};
pub use guard::OutputGuard;
pub use signal::BinaryEvent;

// ═══════════════════════════════════════════════════════════════
//  Flags
// ═══════════════════════════════════════════════════════════════

/// Shared boolean written by one task and polled by others.
pub struct Flag(AtomicBool);

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}

impl Flag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn set(&self, on: bool) {
        self.0.store(on, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Scope during which the urgent response owns the operator's attention.
/// Escalation reporting is suppressed until this is dropped.
pub struct SuppressionWindow<'a> {
    flag: &'a Flag,
}

impl Drop for SuppressionWindow<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

// ═══════════════════════════════════════════════════════════════
//  Shared state
// ═══════════════════════════════════════════════════════════════

pub struct Shared<S> {
    /// Escalation level, `[0, max_escalation]`.
    pub counter: EscalationCounter,
    /// One permit per accepted rising edge, consumed by the aggregator.
    pub escalations: CountingEvent,
    /// Debounced button press, at most one pending.
    pub button: BinaryEvent,
    /// Guard around the diagnostic stream.
    pub output: OutputGuard<S>,
    /// Offending derived values awaiting a payload report.
    pub payloads: AuxChannel,
    /// Set while the escalation handler's response sequence runs.
    pub suppression: Flag,
    /// Set while the signal is above threshold.
    pub excursion: Flag,
}

impl<S: ReportSink> Shared<S> {
    /// Initialise every primitive: counter at zero, events empty, guard
    /// unlocked, channel empty.  Must complete before any task starts.
    pub fn new(config: &CoordinatorConfig, sink: S) -> Self {
        Self {
            counter: EscalationCounter::new(config.max_escalation),
            escalations: CountingEvent::new(config.max_escalation),
            button: BinaryEvent::new(),
            output: OutputGuard::new(sink),
            payloads: AuxChannel::new(),
            suppression: Flag::new(),
            excursion: Flag::new(),
        }
    }

    /// Open a suppression window; it closes when the returned guard drops.
    pub fn suppress(&self) -> SuppressionWindow<'_> {
        self.suppression.set(true);
        SuppressionWindow {
            flag: &self.suppression,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppression.get()
    }
}
