//! Log-based report sink adapter.
//!
//! Implements [`ReportSink`] by rendering each [`Report`] through the
//! active [`Skin`] and writing it to the `log` facade (UART / USB-CDC in
//! production).  Urgent reports go out at `error`, escalations at `warn`,
//! routine status at `info`.
//!
//! Lines are formatted into a fixed stack buffer first so that one report
//! reaches the logger as one write.

use core::fmt::Write;

use log::log;

use crate::app::ports::ReportSink;
use crate::app::report::Report;
use crate::config::Skin;

/// Longest rendered report (the critical line plus headroom).
const LINE_CAPACITY: usize = 128;

pub struct LogReportSink {
    skin: Skin,
}

impl LogReportSink {
    pub fn new(skin: Skin) -> Self {
        Self { skin }
    }
}

impl ReportSink for LogReportSink {
    fn emit(&mut self, report: &Report) {
        let mut line: heapless::String<LINE_CAPACITY> = heapless::String::new();
        if write!(line, "{}", report.render(&self.skin)).is_ok() {
            log!(report.level(), "{}", line);
        } else {
            // Oversized skin text: fall back to streaming formatting.
            log!(report.level(), "{}", report.render(&self.skin));
        }
    }
}
