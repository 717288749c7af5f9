//! Port traits: the boundary between the coordination core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ tasks (domain)
//! ```
//!
//! Every task is generic over these traits, so the sampling, capture and
//! response logic never touches a register directly.  The ESP-IDF
//! adapters live in [`crate::adapters`]; the integration tests supply
//! recording mocks.

use super::report::Report;

// ───────────────────────────────────────────────────────────────
// Analog input (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw analog sampling.  One call per Sampling Task period.
pub trait SignalPort {
    /// Read the signal as a 12-bit value (`0..=4095`).
    fn read_signal(&mut self) -> i32;
}

// ───────────────────────────────────────────────────────────────
// Digital I/O
// ───────────────────────────────────────────────────────────────

/// Digital output control.  Fire-and-forget: no acknowledgement.
pub trait OutputPort {
    fn set_output(&mut self, pin: i32, level: bool);
}

/// Digital input read with pull-up semantics: `true` = HIGH = idle,
/// `false` = asserted.
pub trait InputPort {
    fn read_input(&mut self, pin: i32) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic time source plus the task-level blocking delay.
///
/// `now_ms` wraps at `u32::MAX`; consumers compare with
/// `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;

    /// Suspend the calling task for `ms` milliseconds.
    fn delay_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Diagnostic stream
// ───────────────────────────────────────────────────────────────

/// The single textual diagnostic stream.  Callers always reach it through
/// [`OutputGuard`](crate::sync::OutputGuard), never directly.
pub trait ReportSink {
    fn emit(&mut self, report: &Report);
}
