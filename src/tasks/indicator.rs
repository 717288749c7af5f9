//! Alert indicator: blinks the alert LED while the signal is above
//! threshold, unless a response sequence owns the operator's attention.

use crate::app::ports::{Clock, OutputPort, ReportSink};
use crate::config::CoordinatorConfig;
use crate::sync::Shared;

pub struct AlertIndicator {
    pin: i32,
    half_period_ms: u32,
    idle_ms: u32,
}

impl AlertIndicator {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            pin: config.pins.alert,
            half_period_ms: config.indicator_half_period_ms,
            idle_ms: config.indicator_idle_ms,
        }
    }

    /// One blink or one idle check.  Returns `true` if it blinked.
    pub fn step<S, O, C>(&self, shared: &Shared<S>, out: &mut O, clock: &C) -> bool
    where
        S: ReportSink,
        O: OutputPort,
        C: Clock,
    {
        if shared.excursion.get() && !shared.is_suppressed() {
            out.set_output(self.pin, true);
            clock.delay_ms(self.half_period_ms);
            out.set_output(self.pin, false);
            clock.delay_ms(self.half_period_ms);
            true
        } else {
            out.set_output(self.pin, false);
            clock.delay_ms(self.idle_ms);
            false
        }
    }

    pub fn run<S, O, C>(self, shared: &Shared<S>, out: &mut O, clock: &C) -> !
    where
        S: ReportSink,
        O: OutputPort,
        C: Clock,
    {
        loop {
            self.step(shared, out, clock);
        }
    }
}
