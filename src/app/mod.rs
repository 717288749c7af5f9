//! Application boundary: port traits and the report catalogue.
//!
//! Tasks talk to hardware only through [`ports`] and to the operator only
//! through [`report::Report`] values, keeping the coordination core fully
//! testable without real peripherals.

pub mod ports;
pub mod report;
