//! Coordinator configuration
//!
//! All tunable parameters are compiled-in constants.  The coordination
//! core is identical for every product; a preset only changes thresholds,
//! timings, the event-handling mode and the report wording ([`Skin`]).

use serde::Serialize;

use crate::error::{Error, Result};
use crate::pins;

/// Capacity of the auxiliary payload channel.
pub const AUX_CAPACITY: usize = 10;

/// Upper bound for [`CoordinatorConfig::max_escalation`].
pub const COUNTING_CAPACITY: u32 = 16;

/// Full-scale value of the 12-bit ADC.
pub const SIGNAL_FULL_SCALE: i32 = 4095;

/// Where the asynchronous event (button press) is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerMode {
    /// A dedicated high-priority task parks on the event and suppresses
    /// escalation reporting while it responds.
    Dedicated,
    /// The aggregator polls the event each cycle and runs a shorter
    /// response inline.
    Inline,
}

/// How falling edges on the button reach the capture task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaptureMode {
    /// GPIO interrupt stamps an [`EdgeLatch`](crate::drivers::button::EdgeLatch);
    /// the capture task drains and debounces it.
    Interrupt,
    /// The capture task samples the input level and finds edges itself.
    Polling,
}

/// Output and input pins used by the tasks.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PinMap {
    pub heartbeat: i32,
    pub alert: i32,
    pub response: i32,
    pub button: i32,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            heartbeat: pins::HEARTBEAT_GPIO,
            alert: pins::ALERT_GPIO,
            response: pins::RESPONSE_GPIO,
            button: pins::BUTTON_GPIO,
        }
    }
}

/// Report wording for one product.
#[derive(Debug, Clone, Serialize)]
pub struct Skin {
    pub name: &'static str,
    /// Unit suffix for derived values.
    pub unit: &'static str,
    /// Raw sample → derived value divisor.
    pub divisor: i32,
    pub status_label: &'static str,
    pub escalation_lead: &'static str,
    pub escalation_tail: &'static str,
    pub critical: &'static str,
    pub event: &'static str,
    pub payload_label: &'static str,
}

/// Core coordinator configuration
#[derive(Debug, Clone, Serialize)]
pub struct CoordinatorConfig {
    // --- Escalation ---
    /// Raw sample value above which an excursion starts (strictly greater).
    pub threshold: i32,
    /// Saturation level of the escalation counter.
    pub max_escalation: u32,

    // --- Event capture ---
    pub capture_mode: CaptureMode,
    /// Presses closer than this to the last accepted press are discarded.
    pub debounce_ms: u32,
    /// Period of the capture poller (latch drain or level poll).
    pub capture_period_ms: u32,

    // --- Task periods ---
    pub sample_period_ms: u32,
    /// Aggregator backoff when there is nothing to report.
    pub idle_ms: u32,
    /// Aggregator backoff after a report.
    pub report_gap_ms: u32,
    pub heartbeat_half_period_ms: u32,
    pub indicator_half_period_ms: u32,
    pub indicator_idle_ms: u32,

    // --- Response sequence ---
    pub handler_mode: HandlerMode,
    pub event_repeats: u8,
    pub event_gap_ms: u32,
    pub hold_ms: u32,
    pub inline_repeats: u8,
    pub inline_gap_ms: u32,
    pub inline_hold_ms: u32,

    pub pins: PinMap,
    pub skin: Skin,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::vehicle()
    }
}

impl CoordinatorConfig {
    /// Vehicle overspeed / emergency brake.
    pub fn vehicle() -> Self {
        Self {
            threshold: 2400, // ~85 mph
            max_escalation: 7,

            capture_mode: CaptureMode::Interrupt,
            debounce_ms: 50,
            capture_period_ms: 10,

            sample_period_ms: 100, // 10 Hz, hard deadline
            idle_ms: 10,
            report_gap_ms: 100,
            heartbeat_half_period_ms: 1000,
            indicator_half_period_ms: 200,
            indicator_idle_ms: 100,

            handler_mode: HandlerMode::Dedicated,
            event_repeats: 5,
            event_gap_ms: 200,
            hold_ms: 3000,
            inline_repeats: 3,
            inline_gap_ms: 100,
            inline_hold_ms: 1000,

            pins: PinMap::default(),
            skin: Skin {
                name: "vehicle",
                unit: "mph",
                divisor: 30,
                status_label: "Vehicle speed",
                escalation_lead: "WARNING: Vehicle rapidly increasing speed for",
                escalation_tail: "seconds. Reduce speed to avoid collision!",
                critical: "***VEHICLE COLLISION ALERT!*** Vehicle was going too fast...",
                event: "EMERGENCY BRAKE PRESSED! Vehicle will now stop to avoid collision!",
                payload_label: "CURRENT SPEED OVER LIMIT",
            },
        }
    }

    /// Patient heart-rate / IV drip, button handled inside the aggregator.
    pub fn patient() -> Self {
        Self {
            threshold: 3000,
            capture_mode: CaptureMode::Polling,
            handler_mode: HandlerMode::Inline,
            skin: Skin {
                name: "patient",
                unit: "bpm",
                divisor: 20,
                status_label: "Patient heart rate",
                escalation_lead: "WARNING: Patient heart rate elevated for",
                escalation_tail: "seconds. Check on patient immediately!",
                critical: "***PATIENT CRITICAL ALERT!*** Heart rate stayed above the safe limit...",
                event: "NURSE CALL PRESSED! IV drip paused for attendance!",
                payload_label: "HEART RATE OVER LIMIT",
            },
            ..Self::vehicle()
        }
    }

    /// Reject combinations the coordinator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_escalation == 0 {
            return Err(Error::Config("max_escalation must be at least 1"));
        }
        if self.max_escalation > COUNTING_CAPACITY {
            return Err(Error::Config("max_escalation exceeds counting capacity"));
        }
        if !(0..SIGNAL_FULL_SCALE).contains(&self.threshold) {
            return Err(Error::Config("threshold outside 12-bit signal range"));
        }
        if self.skin.divisor <= 0 {
            return Err(Error::Config("skin divisor must be positive"));
        }
        let periods = [
            self.sample_period_ms,
            self.capture_period_ms,
            self.idle_ms,
            self.heartbeat_half_period_ms,
            self.indicator_half_period_ms,
            self.indicator_idle_ms,
        ];
        if periods.contains(&0) {
            return Err(Error::Config("task periods must be non-zero"));
        }
        if self.event_repeats == 0 || self.inline_repeats == 0 {
            return Err(Error::Config("response sequence needs at least one repeat"));
        }
        Ok(())
    }

    /// Worst-case duration of the dedicated response sequence.
    pub fn response_budget_ms(&self) -> u32 {
        self.event_repeats as u32 * self.event_gap_ms + self.hold_ms
    }
}
