//! JSON adapter: Implementation of ReportExporter.
//!
//! Writes each report to its own file, `cohort-<UTC timestamp>.json`, inside
//! the configured export directory. Existing files are never overwritten.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ports::{CohortReport, ExportReceipt, ReportExporter};

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export target already exists: {0}")]
    AlreadyExists(String),
}

/// Pretty-printed JSON file exporter.
#[derive(Debug, Clone)]
pub struct JsonReportExporter {
    dir: PathBuf,
}

impl JsonReportExporter {
    /// Create an exporter writing into `dir` (created on first export).
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(report: &CohortReport) -> String {
        format!(
            "cohort-{}.json",
            report.generated_at.format("%Y%m%dT%H%M%S%.3fZ")
        )
    }
}

impl ReportExporter for JsonReportExporter {
    type Error = ExportError;

    fn export(&self, report: &CohortReport) -> Result<ExportReceipt, Self::Error> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(Self::file_name(report));
        let bytes = serde_json::to_vec_pretty(report)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    ExportError::AlreadyExists(path.display().to_string())
                }
                _ => ExportError::Io(e),
            })?;
        file.write_all(&bytes)?;
        file.write_all(b"\n")?;
        file.flush()?;

        tracing::info!(
            "Exported {} patients to {}",
            report.patient_count,
            path.display()
        );

        Ok(ExportReceipt {
            location: path.display().to_string(),
            bytes: bytes.len() + 1,
        })
    }
}
