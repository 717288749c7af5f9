//! Coordinator bring-up.
//!
//! Builds the [`Shared`] state, then spawns one task per role with the
//! priorities from [`tasks`](crate::tasks).  Nothing is spawned until
//! every primitive exists.  Spawning runs inside one output-guard section,
//! so the spawn log lines stay together and no task reaches the stream
//! before every task exists.
//!
//! | Mode                  | Tasks spawned                                         |
//! |-----------------------|-------------------------------------------------------|
//! | `Dedicated`           | capture, handler, sampler, aggregator, indicator, heartbeat |
//! | `Inline`              | capture, sampler, aggregator, indicator, heartbeat    |

use std::sync::Arc;
use std::thread::JoinHandle;

use log::{Level, info};

use crate::app::ports::{Clock, InputPort, OutputPort, ReportSink, SignalPort};
use crate::config::{CaptureMode, CoordinatorConfig, HandlerMode};
use crate::drivers::button::EdgeLatch;
use crate::drivers::task_pin::spawn_task;
use crate::error::Result;
use crate::sync::Shared;
use crate::tasks::{
    self,
    aggregator::Aggregator,
    capture::{LatchCapture, PollingCapture},
    handler::EscalationHandler,
    heartbeat::Heartbeat,
    indicator::AlertIndicator,
    sampler::Sampler,
};

/// Hardware handed to the coordinator.  Output and clock are cloned into
/// every task that needs them; signal and input have a single owner.
pub struct Ports<P, I, O, C> {
    pub signal: P,
    pub input: I,
    pub output: O,
    pub clock: C,
    /// Edge latch fed by the button ISR (interrupt capture only).
    pub latch: &'static EdgeLatch,
}

pub struct Coordinator<S> {
    shared: Arc<Shared<S>>,
    handles: Vec<JoinHandle<()>>,
}

impl<S> Coordinator<S>
where
    S: ReportSink + Send + 'static,
{
    /// Validate `config`, initialise the shared primitives and spawn the
    /// tasks.  Returns once every task is running.
    pub fn spawn<P, I, O, C>(config: CoordinatorConfig, sink: S, ports: Ports<P, I, O, C>) -> Result<Self>
    where
        P: SignalPort + Send + 'static,
        I: InputPort + Send + 'static,
        O: OutputPort + Clone + Send + 'static,
        C: Clock + Clone + Send + 'static,
    {
        config.validate()?;

        let shared = Arc::new(Shared::new(&config, sink));
        let handles = shared
            .output
            .with(|_| spawn_tasks(&config, &shared, ports))?;

        Ok(Self { shared, handles })
    }

    /// Shared state, for inspection.
    pub fn shared(&self) -> &Arc<Shared<S>> {
        &self.shared
    }

    pub fn task_count(&self) -> usize {
        self.handles.len()
    }

    /// Block on the task threads.  Tasks never return, so this only comes
    /// back if one of them panicked.
    pub fn join(self) {
        for handle in self.handles {
            let name = handle.thread().name().unwrap_or("?").to_owned();
            if handle.join().is_err() {
                self.shared.output.log(
                    Level::Error,
                    format_args!("coordinator: task '{}' panicked", name),
                );
            }
        }
    }
}

fn spawn_tasks<S, P, I, O, C>(
    config: &CoordinatorConfig,
    shared: &Arc<Shared<S>>,
    ports: Ports<P, I, O, C>,
) -> Result<Vec<JoinHandle<()>>>
where
    S: ReportSink + Send + 'static,
    P: SignalPort + Send + 'static,
    I: InputPort + Send + 'static,
    O: OutputPort + Clone + Send + 'static,
    C: Clock + Clone + Send + 'static,
{
    let mut handles = Vec::with_capacity(6);
    let Ports {
        mut signal,
        mut input,
        output,
        clock,
        latch,
    } = ports;

    // ── Capture ──
    match config.capture_mode {
        CaptureMode::Interrupt => {
            let capture = LatchCapture::new(config);
            let sh = shared.clone();
            let clk = clock.clone();
            handles.push(spawn_task(tasks::CAPTURE, move || {
                capture.run(latch, &sh, &clk)
            })?);
        }
        CaptureMode::Polling => {
            let capture = PollingCapture::new(config);
            let sh = shared.clone();
            let clk = clock.clone();
            handles.push(spawn_task(tasks::CAPTURE, move || {
                capture.run(&mut input, &sh, &clk)
            })?);
        }
    }

    // ── Handler ──
    if config.handler_mode == HandlerMode::Dedicated {
        let handler = EscalationHandler::new(config);
        let sh = shared.clone();
        let mut out = output.clone();
        let clk = clock.clone();
        handles.push(spawn_task(tasks::HANDLER, move || {
            handler.run(&sh, &mut out, &clk)
        })?);
    }

    // ── Sampler ──
    {
        let sampler = Sampler::new(config);
        let sh = shared.clone();
        let clk = clock.clone();
        handles.push(spawn_task(tasks::SAMPLER, move || {
            sampler.run(&sh, &mut signal, &clk)
        })?);
    }

    // ── Aggregator ──
    {
        let aggregator = Aggregator::new(config);
        let sh = shared.clone();
        let mut out = output.clone();
        let clk = clock.clone();
        handles.push(spawn_task(tasks::AGGREGATOR, move || {
            aggregator.run(&sh, &mut out, &clk)
        })?);
    }

    // ── Indicator ──
    {
        let indicator = AlertIndicator::new(config);
        let sh = shared.clone();
        let mut out = output.clone();
        let clk = clock.clone();
        handles.push(spawn_task(tasks::INDICATOR, move || {
            indicator.run(&sh, &mut out, &clk)
        })?);
    }

    // ── Heartbeat ──
    {
        let heartbeat = Heartbeat::new(config);
        let mut out = output;
        handles.push(spawn_task(tasks::HEARTBEAT, move || {
            heartbeat.run(&mut out, &clock)
        })?);
    }

    info!(
        "coordinator: {} tasks running ({:?} handler, {:?} capture)",
        handles.len(),
        config.handler_mode,
        config.capture_mode
    );
    Ok(handles)
}
