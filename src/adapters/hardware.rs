//! Hardware adapters: bridge the board to the port traits.
//!
//! Thin wrappers over [`hw_init`](crate::drivers::hw_init); on non-espidf
//! targets the underlying calls are simulation stubs.  The digital
//! adapters are `Copy` so each task can own one.

use crate::app::ports::{InputPort, OutputPort, SignalPort};
use crate::drivers::hw_init;

/// ADC1 channel as the analog signal source.
pub struct AdcSignal {
    channel: u32,
}

impl AdcSignal {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl SignalPort for AdcSignal {
    fn read_signal(&mut self) -> i32 {
        hw_init::adc1_read(self.channel)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GpioOutput;

impl OutputPort for GpioOutput {
    fn set_output(&mut self, pin: i32, level: bool) {
        hw_init::gpio_write(pin, level);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GpioInput;

impl InputPort for GpioInput {
    fn read_input(&mut self, pin: i32) -> bool {
        hw_init::gpio_read(pin)
    }
}
