//! Sampling Task: periodic read, rising-edge detection, escalation.
//!
//! Hard deadline equal to its period.  Each cycle reads the signal once
//! and compares it against the threshold:
//!
//! | Edge      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `Rising`  | count (unless saturated), give one permit, queue payload   |
//! | `Holding` | nothing: one escalation per continuous excursion          |
//! | `Below`   | reset edge, routine status line under the output guard     |

use log::Level;

use crate::app::ports::{Clock, ReportSink, SignalPort};
use crate::app::report::Report;
use crate::config::CoordinatorConfig;
use crate::sync::Shared;

/// Classification of one sample against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Below → above transition.
    Rising,
    /// Above, and already above last cycle.
    Holding,
    /// At or below threshold.
    Below,
}

/// Per-detector edge memory, owned by the sampling task.
#[derive(Debug, Default)]
pub struct RisingEdge {
    above: bool,
}

impl RisingEdge {
    pub fn update(&mut self, value: i32, threshold: i32) -> Edge {
        if value > threshold {
            if self.above {
                Edge::Holding
            } else {
                self.above = true;
                Edge::Rising
            }
        } else {
            self.above = false;
            Edge::Below
        }
    }

    pub fn is_above(&self) -> bool {
        self.above
    }
}

/// What one sampling cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Fresh excursion counted and signalled.
    Escalated { payload_queued: bool },
    /// Fresh excursion while the counter is saturated: no-op.
    Saturated,
    Holding,
    Routine { value: i32 },
}

pub struct Sampler {
    threshold: i32,
    divisor: i32,
    period_ms: u32,
    edge: RisingEdge,
}

impl Sampler {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            threshold: config.threshold,
            divisor: config.skin.divisor,
            period_ms: config.sample_period_ms,
            edge: RisingEdge::default(),
        }
    }

    /// Process one raw sample.
    ///
    /// The payload is queued only together with a permit: a rising edge at
    /// saturation gives neither, so every queued payload has a permit the
    /// aggregator will consume it with.
    pub fn cycle<S: ReportSink>(&mut self, raw: i32, shared: &Shared<S>) -> SampleOutcome {
        let value = raw / self.divisor;

        match self.edge.update(raw, self.threshold) {
            Edge::Rising => {
                shared.excursion.set(true);

                // Increment strictly before the give: a permit can only be
                // consumed once its count is visible.
                if !shared.counter.try_increment() {
                    shared.output.log(
                        Level::Debug,
                        format_args!("sampler: counter saturated at {}", shared.counter.max()),
                    );
                    return SampleOutcome::Saturated;
                }
                shared.escalations.give();

                let payload_queued = shared.payloads.push(value);
                if !payload_queued {
                    shared.output.log(
                        Level::Debug,
                        format_args!("sampler: payload {} dropped, channel full", value),
                    );
                }
                SampleOutcome::Escalated { payload_queued }
            }
            Edge::Holding => SampleOutcome::Holding,
            Edge::Below => {
                shared.excursion.set(false);
                shared.output.emit(&Report::Status { value });
                SampleOutcome::Routine { value }
            }
        }
    }

    /// One period: read, process, and work out the remaining delay.
    ///
    /// The returned delay is the period minus the time spent in the cycle,
    /// and zero when the cycle overran its deadline.
    pub fn tick<S, P, C>(&mut self, shared: &Shared<S>, signal: &mut P, clock: &C) -> u32
    where
        S: ReportSink,
        P: SignalPort,
        C: Clock,
    {
        let started = clock.now_ms();
        let raw = signal.read_signal();
        self.cycle(raw, shared);

        let spent = clock.now_ms().wrapping_sub(started);
        if spent > self.period_ms {
            shared.output.log(
                Level::Warn,
                format_args!("sampler: cycle took {}ms, deadline {}ms", spent, self.period_ms),
            );
        }
        self.period_ms.saturating_sub(spent)
    }

    /// Task body.  Never returns.
    pub fn run<S, P, C>(mut self, shared: &Shared<S>, signal: &mut P, clock: &C) -> !
    where
        S: ReportSink,
        P: SignalPort,
        C: Clock,
    {
        shared.output.log(
            Level::Info,
            format_args!(
                "sampler: threshold={} period={}ms",
                self.threshold, self.period_ms
            ),
        );
        loop {
            let pause = self.tick(shared, signal, clock);
            clock.delay_ms(pause);
        }
    }
}
