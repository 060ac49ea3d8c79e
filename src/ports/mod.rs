//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the triage pipeline and the outside world.

mod exporter;

pub use exporter::{CohortReport, ExportReceipt, ReportExporter};
