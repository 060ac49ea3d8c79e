//! Export port: Trait for handing a ranked cohort to an external sink.
//!
//! A report is a one-shot snapshot; it is never read back by the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Cohort, CriterionWeights, IdealSolutions, PatientRecord};

/// Snapshot of a ranked cohort, most urgent patient first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortReport {
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,

    /// Number of patients in the cohort
    pub patient_count: usize,

    /// Criterion weights the ranking was computed with
    pub weights: CriterionWeights,

    /// PIS/NIS of the cohort (absent when empty)
    pub ideal: Option<IdealSolutions>,

    /// Records sorted by rank
    pub patients: Vec<PatientRecord>,
}

impl CohortReport {
    /// Build a report from the current cohort state.
    #[must_use]
    pub fn from_cohort(cohort: &Cohort, weights: CriterionWeights) -> Self {
        Self {
            generated_at: Utc::now(),
            patient_count: cohort.len(),
            weights,
            ideal: cohort.ideal_solutions(),
            patients: cohort.ranked().into_iter().cloned().collect(),
        }
    }
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Sink-specific location (e.g. a file path)
    pub location: String,
    /// Bytes written
    pub bytes: usize,
}

/// Trait for report sinks.
pub trait ReportExporter: Send + Sync {
    /// Error type for export operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write the report.
    ///
    /// # Errors
    /// Returns error if the sink cannot be written.
    fn export(&self, report: &CohortReport) -> Result<ExportReceipt, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientObservation, TriageModel};

    #[test]
    fn test_report_is_rank_ordered() {
        let model = TriageModel::reference();
        let mut cohort = Cohort::new();
        cohort.add_patient(PatientObservation::stable_sample(), &model);
        cohort.add_patient(PatientObservation::critical_sample(), &model);

        let report = CohortReport::from_cohort(&cohort, *model.weights());
        assert_eq!(report.patient_count, 2);
        assert_eq!(report.patients[0].id, "P2");
        assert_eq!(report.patients[0].rank, 1);
        assert!(report.ideal.is_some());
    }

    #[test]
    fn test_empty_report() {
        let report = CohortReport::from_cohort(&Cohort::new(), CriterionWeights::REFERENCE);
        assert_eq!(report.patient_count, 0);
        assert!(report.patients.is_empty());
        assert!(report.ideal.is_none());
    }
}
