//! GPIO / peripheral pin assignments for the ESP32 DevKit board.
//!
//! Single source of truth: every driver and task config references this
//! module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Liveness heartbeat (green).
pub const HEARTBEAT_GPIO: i32 = 5;
/// Blinks while an excursion is active (red).
pub const ALERT_GPIO: i32 = 4;
/// Held high for the response hold time (blue).
pub const RESPONSE_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// User button (active-low, internal pull-up, falling-edge interrupt)
// ---------------------------------------------------------------------------

pub const BUTTON_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Analog signal (potentiometer stand-in for the sensor)
// ---------------------------------------------------------------------------

/// GPIO34 is ADC1 channel 6 on the classic ESP32.
pub const SIGNAL_ADC_GPIO: i32 = 34;
pub const SIGNAL_ADC_CHANNEL: u32 = 6;
