//! Asynchronous Event Capture: debounced falling edge → binary event.
//!
//! ## Realisations
//!
//! | Mode        | Edge source                               | Debounce        |
//! |-------------|-------------------------------------------|-----------------|
//! | `Interrupt` | GPIO ISR stamps an [`EdgeLatch`]          | this task       |
//! | `Polling`   | this task samples the level every period  | this task       |
//!
//! Either way the state machine is `IDLE → DEBOUNCING → ACCEPTED`: a
//! HIGH→LOW edge more than `debounce_ms` after the last accepted press is
//! accepted and raises the [`BinaryEvent`](crate::sync::BinaryEvent)
//! immediately; anything inside the window is discarded.

use log::Level;

use crate::app::ports::{Clock, InputPort, ReportSink};
use crate::config::CoordinatorConfig;
use crate::drivers::button::EdgeLatch;
use crate::sync::Shared;

/// Window filter anchored on the last *accepted* press.
#[derive(Debug)]
pub struct Debouncer {
    window_ms: u32,
    last_accepted: Option<u32>,
}

impl Debouncer {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// `true` if an edge at `now_ms` counts as a new press.
    pub fn accept(&mut self, now_ms: u32) -> bool {
        match self.last_accepted {
            Some(last) if now_ms.wrapping_sub(last) < self.window_ms => false,
            _ => {
                self.last_accepted = Some(now_ms);
                true
            }
        }
    }
}

fn deliver<S: ReportSink>(debouncer: &mut Debouncer, at_ms: u32, shared: &Shared<S>) -> bool {
    if !debouncer.accept(at_ms) {
        shared.output.log(
            Level::Debug,
            format_args!("capture: edge at {}ms inside debounce window", at_ms),
        );
        return false;
    }
    if !shared.button.raise() {
        shared.output.log(
            Level::Debug,
            format_args!("capture: press coalesced into pending event"),
        );
    }
    true
}

// ═══════════════════════════════════════════════════════════════
//  Interrupt-driven
// ═══════════════════════════════════════════════════════════════

/// Deferred half of the interrupt path: drains the ISR latch.
pub struct LatchCapture {
    debouncer: Debouncer,
    period_ms: u32,
}

impl LatchCapture {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            debouncer: Debouncer::new(config.debounce_ms),
            period_ms: config.capture_period_ms,
        }
    }

    /// Returns `true` when a press was accepted this poll.
    pub fn poll<S: ReportSink>(&mut self, latch: &EdgeLatch, shared: &Shared<S>) -> bool {
        match latch.take() {
            Some(at_ms) => deliver(&mut self.debouncer, at_ms, shared),
            None => false,
        }
    }

    pub fn run<S: ReportSink, C: Clock>(mut self, latch: &EdgeLatch, shared: &Shared<S>, clock: &C) -> ! {
        shared.output.log(
            Level::Info,
            format_args!("capture: interrupt latch, poll every {}ms", self.period_ms),
        );
        loop {
            self.poll(latch, shared);
            clock.delay_ms(self.period_ms);
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Polling
// ═══════════════════════════════════════════════════════════════

/// Level poller for boards without a usable edge interrupt.
pub struct PollingCapture {
    pin: i32,
    debouncer: Debouncer,
    period_ms: u32,
    /// Last observed level; pull-up idles HIGH.
    last_level: bool,
}

impl PollingCapture {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            pin: config.pins.button,
            debouncer: Debouncer::new(config.debounce_ms),
            period_ms: config.capture_period_ms,
            last_level: true,
        }
    }

    /// Sample the input once.  Returns `true` when a press was accepted.
    pub fn poll<S, I>(&mut self, input: &mut I, now_ms: u32, shared: &Shared<S>) -> bool
    where
        S: ReportSink,
        I: InputPort,
    {
        let level = input.read_input(self.pin);
        let falling = self.last_level && !level;
        self.last_level = level;
        falling && deliver(&mut self.debouncer, now_ms, shared)
    }

    pub fn run<S, I, C>(mut self, input: &mut I, shared: &Shared<S>, clock: &C) -> !
    where
        S: ReportSink,
        I: InputPort,
        C: Clock,
    {
        shared.output.log(
            Level::Info,
            format_args!("capture: polling GPIO{} every {}ms", self.pin, self.period_ms),
        );
        loop {
            self.poll(input, clock.now_ms(), shared);
            clock.delay_ms(self.period_ms);
        }
    }
}
