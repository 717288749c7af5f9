//! Alert Aggregator Task: single consumer of the counting event.
//!
//! Each cycle, without blocking:
//!
//! 1. *(inline mode)* take a pending button event and play the short
//!    response sequence.
//! 2. If a permit is pending and no suppression window is open, consume
//!    it, decrement the counter and report the new level.  If the permit
//!    was consumed at the saturation level, add the critical report.
//! 3. Drain one payload and report it.
//!
//! Steps 2 and 3 run inside one output-guard section so the lines appear
//! together.  While suppressed the permit is left pending; nothing is lost.
//!
//! The critical report fires once per ascent: consuming a permit always
//! takes the counter below `max`, so it cannot be observed at `max` again
//! until the sampler has pushed it back up.

use log::{Level, debug};

use crate::app::ports::{Clock, OutputPort, ReportSink};
use crate::app::report::Report;
use crate::config::{CoordinatorConfig, HandlerMode};
use crate::sync::Shared;

use super::handler::ResponseSequence;

/// What one aggregator cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No permit pending.
    Idle,
    /// Permit pending but a response is running; retried next cycle.
    Suppressed,
    /// Permit consumed and reported.
    Reported {
        level: u32,
        critical: bool,
        payload: Option<i32>,
    },
    /// Inline response sequence played.
    Responded,
}

pub struct Aggregator {
    inline: Option<ResponseSequence>,
    idle_ms: u32,
    report_gap_ms: u32,
}

impl Aggregator {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            inline: (config.handler_mode == HandlerMode::Inline)
                .then(|| ResponseSequence::inline(config)),
            idle_ms: config.idle_ms,
            report_gap_ms: config.report_gap_ms,
        }
    }

    pub fn cycle<S, O, C>(&mut self, shared: &Shared<S>, out: &mut O, clock: &C) -> CycleOutcome
    where
        S: ReportSink,
        O: OutputPort,
        C: Clock,
    {
        if let Some(sequence) = &self.inline {
            if shared.button.try_take() {
                shared
                    .output
                    .log(Level::Info, format_args!("aggregator: event received, inline response"));
                sequence.play(&shared.output, out, clock);
                return CycleOutcome::Responded;
            }
        }

        if shared.escalations.pending() == 0 {
            return CycleOutcome::Idle;
        }

        shared.output.with(|sink| {
            if shared.is_suppressed() {
                return CycleOutcome::Suppressed;
            }
            if !shared.escalations.try_take() {
                return CycleOutcome::Idle;
            }
            let Some(before) = shared.counter.decrement() else {
                // Already inside the section.
                debug!("aggregator: permit without count");
                return CycleOutcome::Idle;
            };

            let level = before - 1;
            sink.emit(&Report::Escalation { level });

            let critical = before == shared.counter.max();
            if critical {
                sink.emit(&Report::Critical);
            }

            let payload = shared.payloads.pop();
            if let Some(value) = payload {
                sink.emit(&Report::Payload { value });
            }

            CycleOutcome::Reported {
                level,
                critical,
                payload,
            }
        })
    }

    /// Task body.  Never returns.
    pub fn run<S, O, C>(mut self, shared: &Shared<S>, out: &mut O, clock: &C) -> !
    where
        S: ReportSink,
        O: OutputPort,
        C: Clock,
    {
        shared.output.log(
            Level::Info,
            format_args!(
                "aggregator: idle={}ms inline={}",
                self.idle_ms,
                self.inline.is_some()
            ),
        );
        loop {
            let pause = match self.cycle(shared, out, clock) {
                CycleOutcome::Reported { .. } => self.report_gap_ms,
                _ => self.idle_ms,
            };
            clock.delay_ms(pause);
        }
    }
}
