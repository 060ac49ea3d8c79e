//! Adapters layer: Concrete implementations of ports.
//!
//! - `json`: serde_json file export of ranked cohorts

pub mod json;

// Re-export export error for lib.rs
pub use json::ExportError;
