//! Escalation Handler Task: bounded urgent response to the button.
//!
//! Parks on the [`BinaryEvent`](crate::sync::BinaryEvent) with no timeout.
//! On each permit it opens a suppression window, repeats the event report
//! `event_repeats` times `event_gap_ms` apart, holds the response pin high
//! for `hold_ms`, and closes the window.  Execution time is therefore
//! bounded by [`CoordinatorConfig::response_budget_ms`].
//!
//! Escalations raised meanwhile stay pending in the counting event and are
//! reported by the aggregator after the window closes.

use log::Level;

use crate::app::ports::{Clock, OutputPort, ReportSink};
use crate::app::report::Report;
use crate::config::CoordinatorConfig;
use crate::sync::{OutputGuard, Shared};

/// Fixed output + pin-pulse sequence.  Used by the dedicated handler and by
/// the aggregator's inline variant with shorter timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSequence {
    pub pin: i32,
    pub repeats: u8,
    pub gap_ms: u32,
    pub hold_ms: u32,
}

impl ResponseSequence {
    pub fn dedicated(config: &CoordinatorConfig) -> Self {
        Self {
            pin: config.pins.response,
            repeats: config.event_repeats,
            gap_ms: config.event_gap_ms,
            hold_ms: config.hold_ms,
        }
    }

    pub fn inline(config: &CoordinatorConfig) -> Self {
        Self {
            pin: config.pins.response,
            repeats: config.inline_repeats,
            gap_ms: config.inline_gap_ms,
            hold_ms: config.inline_hold_ms,
        }
    }

    /// Play the sequence.  The output guard is taken per line and never
    /// held across a delay.
    pub fn play<S, O, C>(&self, output: &OutputGuard<S>, out: &mut O, clock: &C)
    where
        S: ReportSink,
        O: OutputPort,
        C: Clock,
    {
        for repeat in 1..=self.repeats {
            output.emit(&Report::Event { repeat });
            clock.delay_ms(self.gap_ms);
        }
        out.set_output(self.pin, true);
        clock.delay_ms(self.hold_ms);
        out.set_output(self.pin, false);
    }

    pub fn duration_ms(&self) -> u32 {
        self.repeats as u32 * self.gap_ms + self.hold_ms
    }
}

pub struct EscalationHandler {
    sequence: ResponseSequence,
}

impl EscalationHandler {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            sequence: ResponseSequence::dedicated(config),
        }
    }

    /// One full response with reporting suppressed throughout.
    pub fn respond<S, O, C>(&self, shared: &Shared<S>, out: &mut O, clock: &C)
    where
        S: ReportSink,
        O: OutputPort,
        C: Clock,
    {
        let _window = shared.suppress();
        self.sequence.play(&shared.output, out, clock);
    }

    /// Task body.  Never returns.
    pub fn run<S, O, C>(self, shared: &Shared<S>, out: &mut O, clock: &C) -> !
    where
        S: ReportSink,
        O: OutputPort,
        C: Clock,
    {
        shared.output.log(
            Level::Info,
            format_args!(
                "handler: waiting for events (response {}ms)",
                self.sequence.duration_ms()
            ),
        );
        loop {
            shared.button.wait();
            shared.output.log(
                Level::Info,
                format_args!("handler: event received, suppressing escalation reports"),
            );
            self.respond(shared, out, clock);
            shared
                .output
                .log(Level::Info, format_args!("handler: response complete"));
        }
    }
}
