//! Coordinator tasks and their scheduling parameters.
//!
//! Fixed-priority preemptive scheduling, highest first:
//!
//! | Task        | Priority | Blocks on                          |
//! |-------------|----------|------------------------------------|
//! | capture     | 4        | fixed 10 ms delay                  |
//! | handler     | 3        | button event (unbounded)           |
//! | sampler     | 2        | fixed period (hard deadline)       |
//! | aggregator  | 2        | idle / report backoff              |
//! | indicator   | 2        | blink half-period                  |
//! | heartbeat   | 1        | blink half-period                  |
//!
//! Every task body is a `run` method that never returns; the per-cycle
//! logic is a separate method so tests can drive it step by step.

pub mod aggregator;
pub mod capture;
pub mod handler;
pub mod heartbeat;
pub mod indicator;
pub mod sampler;

/// Spawn parameters for one task.  `name` is null-terminated for
/// FreeRTOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: &'static str,
    pub priority: u8,
    pub stack_kb: usize,
}

pub const CAPTURE: TaskSpec = TaskSpec {
    name: "capture\0",
    priority: 4,
    stack_kb: 3,
};

pub const HANDLER: TaskSpec = TaskSpec {
    name: "handler\0",
    priority: 3,
    stack_kb: 4,
};

pub const SAMPLER: TaskSpec = TaskSpec {
    name: "sampler\0",
    priority: 2,
    stack_kb: 4,
};

pub const AGGREGATOR: TaskSpec = TaskSpec {
    name: "aggregator\0",
    priority: 2,
    stack_kb: 4,
};

pub const INDICATOR: TaskSpec = TaskSpec {
    name: "indicator\0",
    priority: 2,
    stack_kb: 2,
};

pub const HEARTBEAT: TaskSpec = TaskSpec {
    name: "heartbeat\0",
    priority: 1,
    stack_kb: 2,
};
