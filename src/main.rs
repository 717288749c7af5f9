//! Escalator firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  AdcSignal     GpioInput    GpioOutput    SystemClock        │
//! │  (SignalPort)  (InputPort)  (OutputPort)  (Clock)            │
//! │  LogReportSink (ReportSink)      button ISR → EdgeLatch      │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │  capture · handler · sampler · aggregator            │    │
//! │  │  indicator · heartbeat         (Shared primitives)   │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use log::info;

use escalator::adapters::hardware::{AdcSignal, GpioInput, GpioOutput};
use escalator::adapters::log_sink::LogReportSink;
use escalator::adapters::time::SystemClock;
use escalator::config::CoordinatorConfig;
use escalator::drivers::{button::BUTTON_LATCH, hw_init};
use escalator::pins;
use escalator::runtime::{Coordinator, Ports};

#[cfg(feature = "patient")]
fn preset() -> CoordinatorConfig {
    CoordinatorConfig::patient()
}

#[cfg(not(feature = "patient"))]
fn preset() -> CoordinatorConfig {
    CoordinatorConfig::vehicle()
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Escalator v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = preset();
    config.validate()?;
    info!("Config ({}): {}", config.skin.name, serde_json::to_string(&config)?);

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;
    hw_init::init_isr_service()?;

    // ── 4. Tasks ──────────────────────────────────────────────
    let sink = LogReportSink::new(config.skin.clone());
    let ports = Ports {
        signal: AdcSignal::new(pins::SIGNAL_ADC_CHANNEL),
        input: GpioInput,
        output: GpioOutput,
        clock: SystemClock::new(),
        latch: &BUTTON_LATCH,
    };
    let coordinator = Coordinator::spawn(config, sink, ports)?;

    info!("System ready, {} tasks running.", coordinator.task_count());
    coordinator.join();
    Ok(())
}
