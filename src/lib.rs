//! # Vitalrank
//!
//! Patient prioritization from vital signs using neutrosophic fuzzy scoring
//! and TOPSIS ranking.
//!
//! This crate provides:
//! - Gaussian fuzzification of seven vital signs into (positive, negative,
//!   neutral) truth triples
//! - Weighted aggregation and cohort-relative ideal-solution ranking
//! - Fixed-band severity labels
//! - A terminal UI and a batch ranking tool as independent front ends
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Scoring pipeline and cohort types
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (JSON report export)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Cohort, NeutrosophicTriple, PatientObservation, PatientRecord, TriageModel};

/// Result type for Vitalrank operations
pub type Result<T> = std::result::Result<T, VitalrankError>;

/// Main error type for Vitalrank
#[derive(Debug, thiserror::Error)]
pub enum VitalrankError {
    #[error("Export failed: {0}")]
    Export(#[from] adapters::ExportError),

    #[error("Invalid patient data: {0}")]
    Validation(String),

    #[error("Cohort state unavailable: {0}")]
    State(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_step() -> Result<()> {
        Err(adapters::ExportError::AlreadyExists("cohort.json".into()))?;
        Ok(())
    }

    #[test]
    fn test_export_error_converts() {
        let err = export_step().expect_err("export should fail");
        assert!(matches!(err, VitalrankError::Export(_)));
        assert!(err.to_string().starts_with("Export failed"));
    }
}
