//! Mutual exclusion around the diagnostic stream.
//!
//! An `embassy-sync` async [`Mutex`] driven to completion with
//! `block_on`, so waiting tasks park instead of spinning.  A section must
//! never block on anything else (a delay, an event wait) while holding the
//! guard.
//!
//! Reports and task log lines share one serial stream.  Running tasks log
//! through [`OutputGuard::log`] so a log line can never split a report
//! section.

use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use futures_lite::future::block_on;

use crate::app::ports::ReportSink;
use crate::app::report::Report;

pub struct OutputGuard<S> {
    sink: Mutex<CriticalSectionRawMutex, S>,
}

impl<S: ReportSink> OutputGuard<S> {
    pub const fn new(sink: S) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Run `f` with exclusive access to the sink.  Everything emitted
    /// inside one call appears contiguously in the stream.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut sink = block_on(self.sink.lock());
        f(&mut sink)
    }

    /// Single-line convenience wrapper around [`with`](Self::with).
    pub fn emit(&self, report: &Report) {
        self.with(|sink| sink.emit(report));
    }

    /// Write one task log line as its own section of the stream.  Must not
    /// be called from inside [`with`](Self::with).
    pub fn log(&self, level: log::Level, args: fmt::Arguments<'_>) {
        self.with(|_| log::log!(level, "{}", args));
    }
}
