//! Liveness Task: lowest-priority heartbeat toggle.  No shared state; its
//! blinking proves the scheduler still runs low-priority work.

use crate::app::ports::{Clock, OutputPort};
use crate::config::CoordinatorConfig;

pub struct Heartbeat {
    pin: i32,
    half_period_ms: u32,
    lit: bool,
}

impl Heartbeat {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            pin: config.pins.heartbeat,
            half_period_ms: config.heartbeat_half_period_ms,
            lit: false,
        }
    }

    /// Flip the output.  Returns the new level.
    pub fn toggle<O: OutputPort>(&mut self, out: &mut O) -> bool {
        self.lit = !self.lit;
        out.set_output(self.pin, self.lit);
        self.lit
    }

    pub fn run<O: OutputPort, C: Clock>(mut self, out: &mut O, clock: &C) -> ! {
        loop {
            self.toggle(out);
            clock.delay_ms(self.half_period_ms);
        }
    }
}
