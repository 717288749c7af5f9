//! Threshold-escalation coordinator.
//!
//! A fixed set of prioritised tasks watches an analog signal, counts
//! threshold excursions into a bounded escalation level, reports them on a
//! guarded diagnostic stream and answers a debounced button with a bounded
//! urgent response that briefly suppresses escalation reporting.
//!
//! The coordination core is board-independent: every task is generic over
//! the port traits in [`app::ports`].  ESP-IDF calls are confined to
//! [`drivers`] and [`adapters`] and guarded by
//! `#[cfg(target_os = "espidf")]`, with simulation stubs elsewhere.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod runtime;
pub mod sync;
pub mod tasks;
