//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Ranked cohort dashboard
//! - Vital signs entry
//! - Per-patient criterion matrix
//! - Priority and membership charts

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
