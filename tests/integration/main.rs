//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one coordination path
//! against mock adapters and a virtual clock.  All tests run on the host
//! (x86_64) with no real hardware required.

mod capture_tests;
mod mock_hw;
mod response_tests;
mod status_led_tests;
