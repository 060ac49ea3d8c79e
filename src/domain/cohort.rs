//! Patient cohort and ranked patient records.
//!
//! Ranking is cohort-relative: every mutation recomputes every record. There
//! is no incremental update path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryLabels;
use super::model::TriageModel;
use super::patient::{PatientObservation, CRITERIA_COUNT};
use super::ranking::{self, IdealSolutions};
use super::triple::NeutrosophicTriple;

/// Fully computed result for one patient of the current cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Sequential identifier ("P1", "P2", ...)
    pub id: String,

    /// Raw vitals as entered
    pub observation: PatientObservation,

    /// Per-criterion triples (7 x 3)
    pub matrix: [NeutrosophicTriple; CRITERIA_COUNT],

    /// Weighted aggregate of the matrix
    pub aggregated: NeutrosophicTriple,

    /// Distance to the positive ideal solution (D+)
    pub distance_to_best: f64,

    /// Distance to the negative ideal solution (D-)
    pub distance_to_worst: f64,

    /// Closeness coefficient (Csi)
    pub closeness: f64,

    /// Dense rank, 1 = most urgent
    pub rank: usize,

    /// Qualitative labels of the aggregated triple
    pub labels: CategoryLabels,

    /// When the patient joined the cohort
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CohortEntry {
    observation: PatientObservation,
    added_at: DateTime<Utc>,
}

/// Insertion-ordered patient collection, mutated only by append and reset.
#[derive(Debug, Clone, Default)]
pub struct Cohort {
    entries: Vec<CohortEntry>,
    records: Vec<PatientRecord>,
    ideal: Option<IdealSolutions>,
}

impl Cohort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a patient and recompute the whole cohort.
    ///
    /// Returns the new patient's record.
    pub fn add_patient(
        &mut self,
        observation: PatientObservation,
        model: &TriageModel,
    ) -> &PatientRecord {
        let flagged = observation.out_of_domain();
        if !flagged.is_empty() {
            tracing::warn!(
                "Patient P{} has vitals outside the declared domain: {:?}",
                self.entries.len() + 1,
                flagged
            );
        }

        self.entries.push(CohortEntry {
            observation,
            added_at: Utc::now(),
        });
        self.recompute(model);

        &self.records[self.records.len() - 1]
    }

    /// Rebuild every record from the stored observations.
    pub fn recompute(&mut self, model: &TriageModel) {
        let assessments: Vec<_> = self
            .entries
            .iter()
            .map(|e| model.assess(&e.observation))
            .collect();

        let aggregated: Vec<NeutrosophicTriple> =
            assessments.iter().map(|a| a.aggregated).collect();
        let ranking = ranking::rank(&aggregated);

        let records = self
            .entries
            .iter()
            .zip(assessments)
            .zip(ranking.scores)
            .enumerate()
            .map(|(i, ((entry, assessment), score))| PatientRecord {
                id: format!("P{}", i + 1),
                observation: entry.observation,
                matrix: assessment.matrix,
                aggregated: assessment.aggregated,
                distance_to_best: score.distance_to_best,
                distance_to_worst: score.distance_to_worst,
                closeness: score.closeness,
                rank: score.rank,
                labels: model.categorize(&assessment.aggregated),
                added_at: entry.added_at,
            })
            .collect();

        self.records = records;
        self.ideal = ranking.ideal;
        tracing::debug!("Recomputed cohort of {} patients", self.records.len());
    }

    /// Remove every patient; ids restart at P1.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.records.clear();
        self.ideal = None;
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Records by rank (most urgent first), ties in insertion order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&PatientRecord> {
        let mut ranked: Vec<&PatientRecord> = self.records.iter().collect();
        // Stable sort keeps insertion order within a rank.
        ranked.sort_by_key(|r| r.rank);
        ranked
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// PIS/NIS of the current cohort; `None` when empty.
    #[must_use]
    pub fn ideal_solutions(&self) -> Option<IdealSolutions> {
        self.ideal
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Criticality;
    use crate::domain::ranking::DEGENERATE_CLOSENESS;

    #[test]
    fn test_empty_cohort() {
        let mut cohort = Cohort::new();
        cohort.recompute(&TriageModel::reference());
        assert!(cohort.is_empty());
        assert!(cohort.records().is_empty());
        assert!(cohort.ideal_solutions().is_none());
    }

    #[test]
    fn test_single_patient() {
        let model = TriageModel::reference();
        let mut cohort = Cohort::new();
        let record = cohort.add_patient(PatientObservation::stable_sample(), &model);

        assert_eq!(record.id, "P1");
        assert_eq!(record.rank, 1);
        assert_eq!(record.closeness, DEGENERATE_CLOSENESS);
        assert_eq!(record.distance_to_best, 0.0);
        assert_eq!(record.distance_to_worst, 0.0);
    }

    #[test]
    fn test_critical_patient_ranked_first() {
        let model = TriageModel::reference();
        let mut cohort = Cohort::new();
        cohort.add_patient(PatientObservation::stable_sample(), &model);
        cohort.add_patient(PatientObservation::critical_sample(), &model);

        let a = cohort.get("P1").expect("P1");
        let b = cohort.get("P2").expect("P2");
        assert_eq!(b.rank, 1);
        assert_eq!(a.rank, 2);
        assert!(b.closeness < a.closeness);
        assert_eq!(b.labels.criticality, Criticality::VeryCritical);
        assert_eq!(a.labels.criticality, Criticality::Normal);

        let ranked: Vec<&str> = cohort.ranked().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ranked, vec!["P2", "P1"]);
    }

    #[test]
    fn test_add_recomputes_existing_records() {
        let model = TriageModel::reference();
        let mut cohort = Cohort::new();
        cohort.add_patient(PatientObservation::stable_sample(), &model);
        assert_eq!(cohort.records()[0].closeness, DEGENERATE_CLOSENESS);

        cohort.add_patient(PatientObservation::critical_sample(), &model);
        assert!((cohort.records()[0].closeness - 1.0).abs() < 1e-12);
        assert_eq!(cohort.records()[0].rank, 2);

        let ideal = cohort.ideal_solutions().expect("Non-empty");
        assert_eq!(ideal.best, cohort.records()[0].aggregated);
        assert_eq!(ideal.worst, cohort.records()[1].aggregated);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let model = TriageModel::reference();
        let mut cohort = Cohort::new();
        cohort.add_patient(PatientObservation::stable_sample(), &model);
        cohort.add_patient(PatientObservation::critical_sample(), &model);
        cohort.add_patient(PatientObservation::critical_sample(), &model);

        let ranked: Vec<(&str, usize)> = cohort
            .ranked()
            .iter()
            .map(|r| (r.id.as_str(), r.rank))
            .collect();
        assert_eq!(ranked, vec![("P2", 1), ("P3", 1), ("P1", 2)]);
    }

    #[test]
    fn test_reset_restarts_ids() {
        let model = TriageModel::reference();
        let mut cohort = Cohort::new();
        cohort.add_patient(PatientObservation::stable_sample(), &model);
        cohort.add_patient(PatientObservation::critical_sample(), &model);

        cohort.reset();
        assert!(cohort.is_empty());
        assert!(cohort.ideal_solutions().is_none());

        let record = cohort.add_patient(PatientObservation::critical_sample(), &model);
        assert_eq!(record.id, "P1");
    }
}
