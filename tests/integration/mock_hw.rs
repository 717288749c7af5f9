//! Mock hardware adapters for integration tests.
//!
//! Every adapter records what it was asked to do so tests can assert on
//! the full history without touching real GPIO/ADC registers.  Time is
//! virtual: [`SimClock`] only advances when a task delays.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use escalator::app::ports::{Clock, InputPort, OutputPort, ReportSink, SignalPort};
use escalator::app::report::Report;
use escalator::config::CoordinatorConfig;
use escalator::sync::Shared;

// ── RecordingSink ─────────────────────────────────────────────

/// Report sink that keeps every report in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub reports: Vec<Report>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for RecordingSink {
    fn emit(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}

/// Snapshot of everything the sink has seen so far.
pub fn reports(shared: &Shared<RecordingSink>) -> Vec<Report> {
    shared.output.with(|sink| sink.reports.clone())
}

pub fn count(shared: &Shared<RecordingSink>, pred: impl Fn(&Report) -> bool) -> usize {
    shared.output.with(|sink| sink.reports.iter().filter(|r| pred(r)).count())
}

pub fn shared(config: &CoordinatorConfig) -> Shared<RecordingSink> {
    Shared::new(config, RecordingSink::new())
}

// ── MockOutput ────────────────────────────────────────────────

/// Clonable output recorder; clones share one history.
#[derive(Debug, Clone, Default)]
pub struct MockOutput {
    pub calls: Arc<Mutex<Vec<(i32, bool)>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self, pin: i32) -> Vec<bool> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .collect()
    }

    pub fn level(&self, pin: i32) -> bool {
        self.history(pin).last().copied().unwrap_or(false)
    }
}

impl OutputPort for MockOutput {
    fn set_output(&mut self, pin: i32, level: bool) {
        self.calls.lock().unwrap().push((pin, level));
    }
}

// ── SimClock ──────────────────────────────────────────────────

/// Virtual millisecond clock.  `delay_ms` advances time instead of
/// sleeping; clones share one timeline.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Arc<AtomicU32>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u32) -> Self {
        Self {
            now: Arc::new(AtomicU32::new(ms)),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }

    fn delay_ms(&self, ms: u32) {
        self.advance(ms);
    }
}

// ── ScriptedSignal ────────────────────────────────────────────

/// Replays a fixed sample sequence, then repeats the last sample.
/// Optionally each read costs virtual time on a shared [`SimClock`].
#[derive(Debug, Default)]
pub struct ScriptedSignal {
    samples: VecDeque<i32>,
    last: i32,
    latency: Option<(SimClock, u32)>,
}

impl ScriptedSignal {
    pub fn new(samples: &[i32]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            last: 0,
            latency: None,
        }
    }

    /// Every read advances `clock` by `ms` before returning.
    pub fn with_latency(samples: &[i32], clock: &SimClock, ms: u32) -> Self {
        Self {
            latency: Some((clock.clone(), ms)),
            ..Self::new(samples)
        }
    }
}

impl SignalPort for ScriptedSignal {
    fn read_signal(&mut self) -> i32 {
        if let Some((clock, ms)) = &self.latency {
            clock.advance(*ms);
        }
        if let Some(v) = self.samples.pop_front() {
            self.last = v;
        }
        self.last
    }
}

// ── MockInput ─────────────────────────────────────────────────

/// Replays input levels; idles HIGH (pull-up) once exhausted.
#[derive(Debug, Default)]
pub struct MockInput {
    levels: VecDeque<bool>,
}

impl MockInput {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
        }
    }
}

impl InputPort for MockInput {
    fn read_input(&mut self, _pin: i32) -> bool {
        self.levels.pop_front().unwrap_or(true)
    }
}
