//! Diagnostic report catalogue.
//!
//! Tasks emit these through the [`ReportSink`](super::ports::ReportSink)
//! port.  The wording is not part of the report: a [`Skin`] supplies the
//! text at render time, so the vehicle and patient builds share one
//! coordination core.

use core::fmt;

use crate::config::Skin;

/// Structured reports emitted by the coordinator tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Routine status line with the current derived value (below threshold).
    Status { value: i32 },

    /// An escalation permit was consumed; `level` is the counter after the
    /// decrement.
    Escalation { level: u32 },

    /// Terminal report, once per ascent of the counter to its maximum.
    Critical,

    /// Asynchronous event acknowledgement, `repeat` counts from 1.
    Event { repeat: u8 },

    /// An auxiliary payload (the offending derived value) was drained.
    Payload { value: i32 },
}

impl Report {
    /// Log level the default sink uses for this report.
    pub fn level(&self) -> log::Level {
        match self {
            Self::Status { .. } => log::Level::Info,
            Self::Escalation { .. } | Self::Payload { .. } => log::Level::Warn,
            Self::Critical | Self::Event { .. } => log::Level::Error,
        }
    }

    /// Bind this report to a skin for display.
    pub fn render<'a>(&'a self, skin: &'a Skin) -> Rendered<'a> {
        Rendered { report: self, skin }
    }
}

/// A report paired with the text skin it renders through.
pub struct Rendered<'a> {
    report: &'a Report,
    skin: &'a Skin,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let skin = self.skin;
        match *self.report {
            Report::Status { value } => {
                write!(f, "{}: {} {}", skin.status_label, value, skin.unit)
            }
            Report::Escalation { level } => {
                write!(f, "{} {} {}", skin.escalation_lead, level, skin.escalation_tail)
            }
            Report::Critical => f.write_str(skin.critical),
            Report::Event { .. } => f.write_str(skin.event),
            Report::Payload { value } => {
                write!(f, "{}: {} {}", skin.payload_label, value, skin.unit)
            }
        }
    }
}
