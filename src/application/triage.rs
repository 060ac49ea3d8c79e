//! Triage service: Orchestrates cohort mutation, ranking and export.
//!
//! The cohort sits behind a mutex; add + recompute and reset happen under a
//! single lock acquisition, so no reader ever sees a half-updated cohort.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{Cohort, IdealSolutions, PatientObservation, PatientRecord, TriageModel};
use crate::ports::{CohortReport, ExportReceipt, ReportExporter};
use crate::VitalrankError;

/// Consistent view of the cohort at one instant.
#[derive(Debug, Clone, Default)]
pub struct CohortSnapshot {
    /// Records by rank, most urgent first
    pub ranked: Vec<PatientRecord>,
    /// PIS/NIS, absent for an empty cohort
    pub ideal: Option<IdealSolutions>,
}

impl CohortSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Service for scoring and ranking a patient cohort.
pub struct TriageService<E>
where
    E: ReportExporter,
{
    model: TriageModel,
    cohort: Mutex<Cohort>,
    exporter: Arc<E>,
}

impl<E> TriageService<E>
where
    E: ReportExporter,
    E::Error: Into<crate::adapters::ExportError>,
{
    /// Create a service with the reference model and an empty cohort.
    pub fn new(exporter: Arc<E>) -> Self {
        Self::with_model(TriageModel::reference(), exporter)
    }

    pub fn with_model(model: TriageModel, exporter: Arc<E>) -> Self {
        Self {
            model,
            cohort: Mutex::new(Cohort::new()),
            exporter,
        }
    }

    #[must_use]
    pub fn model(&self) -> &TriageModel {
        &self.model
    }

    fn lock(&self) -> Result<MutexGuard<'_, Cohort>, VitalrankError> {
        self.cohort
            .lock()
            .map_err(|_| VitalrankError::State("cohort lock poisoned".to_string()))
    }

    /// Score a new patient and re-rank the cohort.
    ///
    /// # Errors
    /// Returns error if any vital is not a finite number or the cohort lock
    /// is poisoned. Out-of-domain but finite values are accepted.
    pub fn add_patient(
        &self,
        observation: PatientObservation,
    ) -> Result<PatientRecord, VitalrankError> {
        if let Some(criterion) = observation
            .to_array()
            .iter()
            .zip(crate::domain::Criterion::ALL)
            .find_map(|(v, c)| (!v.is_finite()).then_some(c))
        {
            return Err(VitalrankError::Validation(format!(
                "{criterion} must be a finite number"
            )));
        }

        let mut cohort = self.lock()?;
        let record = cohort.add_patient(observation, &self.model).clone();

        tracing::info!(
            "Added patient {} (cohort size {}, P={:.4} N={:.4} U={:.4})",
            record.id,
            cohort.len(),
            record.aggregated.positive,
            record.aggregated.negative,
            record.aggregated.neutral
        );

        Ok(record)
    }

    /// Empty the cohort.
    ///
    /// # Errors
    /// Returns error if the cohort lock is poisoned.
    pub fn reset(&self) -> Result<(), VitalrankError> {
        let mut cohort = self.lock()?;
        let removed = cohort.len();
        cohort.reset();
        tracing::info!("Cohort reset ({} patients removed)", removed);
        Ok(())
    }

    /// Copy of the ranked cohort.
    ///
    /// # Errors
    /// Returns error if the cohort lock is poisoned.
    pub fn snapshot(&self) -> Result<CohortSnapshot, VitalrankError> {
        let cohort = self.lock()?;
        Ok(CohortSnapshot {
            ranked: cohort.ranked().into_iter().cloned().collect(),
            ideal: cohort.ideal_solutions(),
        })
    }

    /// Number of patients in the cohort.
    ///
    /// # Errors
    /// Returns error if the cohort lock is poisoned.
    pub fn len(&self) -> Result<usize, VitalrankError> {
        Ok(self.lock()?.len())
    }

    /// # Errors
    /// Returns error if the cohort lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, VitalrankError> {
        Ok(self.len()? == 0)
    }

    /// Write a report of the current cohort through the exporter.
    ///
    /// # Errors
    /// Returns error if the cohort is empty or the exporter fails.
    pub fn export(&self) -> Result<ExportReceipt, VitalrankError> {
        let report = {
            let cohort = self.lock()?;
            if cohort.is_empty() {
                return Err(VitalrankError::Validation(
                    "Nothing to export: cohort is empty".to_string(),
                ));
            }
            CohortReport::from_cohort(&cohort, *self.model.weights())
        };

        self.exporter
            .export(&report)
            .map_err(|e| VitalrankError::Export(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::json::JsonReportExporter;
    use crate::domain::Criticality;
    use tempfile::TempDir;

    fn create_test_service() -> (TriageService<JsonReportExporter>, TempDir) {
        let temp = TempDir::new().expect("tempdir");
        let exporter = Arc::new(JsonReportExporter::new(temp.path()));
        (TriageService::new(exporter), temp)
    }

    #[test]
    fn test_add_and_snapshot() {
        let (service, _temp) = create_test_service();
        assert!(service.is_empty().expect("Should read cohort"));

        let a = service
            .add_patient(PatientObservation::stable_sample())
            .expect("Should add");
        assert_eq!(a.id, "P1");
        assert_eq!(a.rank, 1);

        let b = service
            .add_patient(PatientObservation::critical_sample())
            .expect("Should add");
        assert_eq!(b.id, "P2");
        assert_eq!(b.rank, 1);
        assert_eq!(b.labels.criticality, Criticality::VeryCritical);

        let snapshot = service.snapshot().expect("Should snapshot");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.ranked[0].id, "P2");
        assert_eq!(snapshot.ranked[1].id, "P1");
        assert_eq!(snapshot.ranked[1].rank, 2);
        assert!(snapshot.ideal.is_some());
    }

    #[test]
    fn test_rejects_non_finite_vitals() {
        let (service, _temp) = create_test_service();
        let mut observation = PatientObservation::stable_sample();
        observation.heart_rate = f64::NAN;

        let err = service.add_patient(observation).expect_err("NaN rejected");
        assert!(matches!(err, VitalrankError::Validation(_)));
        assert!(err.to_string().contains("Heart Rate"));
        assert!(service.is_empty().expect("Should read cohort"));
    }

    #[test]
    fn test_accepts_out_of_domain_vitals() {
        let (service, _temp) = create_test_service();
        let mut observation = PatientObservation::stable_sample();
        observation.heart_rate = 400.0;

        service.add_patient(observation).expect("Out-of-domain accepted");
        assert_eq!(service.len().expect("Should read cohort"), 1);
    }

    #[test]
    fn test_reset() {
        let (service, _temp) = create_test_service();
        service
            .add_patient(PatientObservation::stable_sample())
            .expect("Should add");
        service.reset().expect("Should reset");

        let snapshot = service.snapshot().expect("Should snapshot");
        assert!(snapshot.is_empty());
        assert!(snapshot.ideal.is_none());

        let record = service
            .add_patient(PatientObservation::critical_sample())
            .expect("Should add");
        assert_eq!(record.id, "P1");
    }

    #[test]
    fn test_export() {
        let (service, temp) = create_test_service();
        let err = service.export().expect_err("Empty cohort");
        assert!(matches!(err, VitalrankError::Validation(_)));

        service
            .add_patient(PatientObservation::stable_sample())
            .expect("Should add");
        let receipt = service.export().expect("Should export");

        assert!(receipt.location.starts_with(&*temp.path().to_string_lossy()));
        assert!(receipt.bytes > 0);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let (service, _temp) = create_test_service();
        service
            .add_patient(PatientObservation::stable_sample())
            .expect("Should add");

        std::thread::scope(|scope| {
            let handle = scope.spawn(|| {
                let _guard = service.cohort.lock().expect("lock");
                panic!("worker failed while holding the cohort");
            });
            assert!(handle.join().is_err());
        });

        assert!(matches!(service.len(), Err(VitalrankError::State(_))));
        assert!(matches!(service.is_empty(), Err(VitalrankError::State(_))));
        assert!(matches!(service.snapshot(), Err(VitalrankError::State(_))));
    }
}
