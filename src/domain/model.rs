//! The composed triage model: catalog, weights and categorizer.

use super::aggregation::CriterionWeights;
use super::category::{Categorizer, CategoryLabels};
use super::membership::MembershipCatalog;
use super::patient::{Criterion, PatientObservation, CRITERIA_COUNT};
use super::scoring;
use super::triple::NeutrosophicTriple;

/// Per-patient output of the scoring and aggregation stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientAssessment {
    /// One triple per criterion, in criterion order
    pub matrix: [NeutrosophicTriple; CRITERIA_COUNT],
    /// Weighted sum of the matrix rows
    pub aggregated: NeutrosophicTriple,
}

/// Fixed model parameters shared by every front end.
#[derive(Debug, Clone, Copy)]
pub struct TriageModel {
    catalog: &'static MembershipCatalog,
    weights: CriterionWeights,
    categorizer: Categorizer,
}

impl Default for TriageModel {
    fn default() -> Self {
        Self::reference()
    }
}

impl TriageModel {
    /// Reference catalog, reference weights, default categorizer.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(CriterionWeights::REFERENCE, Categorizer::default())
    }

    #[must_use]
    pub fn new(weights: CriterionWeights, categorizer: Categorizer) -> Self {
        Self {
            catalog: MembershipCatalog::reference(),
            weights,
            categorizer,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &'static MembershipCatalog {
        self.catalog
    }

    #[must_use]
    pub fn weights(&self) -> &CriterionWeights {
        &self.weights
    }

    /// Score each vital and aggregate the resulting matrix.
    #[must_use]
    pub fn assess(&self, observation: &PatientObservation) -> PatientAssessment {
        let matrix = Criterion::ALL.map(|c| {
            scoring::score(observation.value(c), self.catalog.variable(c))
        });
        let aggregated = self.weights.aggregate(&matrix);

        tracing::debug!("Aggregated triple {}", aggregated);
        PatientAssessment { matrix, aggregated }
    }

    #[must_use]
    pub fn categorize(&self, triple: &NeutrosophicTriple) -> CategoryLabels {
        self.categorizer.categorize(triple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{Criticality, Risk};

    #[test]
    fn test_stable_patient() {
        let model = TriageModel::reference();
        let a = model.assess(&PatientObservation::stable_sample());

        assert_eq!(a.matrix[0], NeutrosophicTriple::new(1.0, 0.0, 0.0));
        assert!((a.aggregated.positive - 0.8957).abs() < 1e-9);
        assert!((a.aggregated.negative - 0.0182).abs() < 1e-9);
        assert!((a.aggregated.neutral - 0.0881).abs() < 1e-9);
        assert!(a.aggregated.positive > 10.0 * a.aggregated.negative);
        assert!(a.aggregated.positive > 10.0 * a.aggregated.neutral);

        assert_eq!(model.categorize(&a.aggregated).criticality, Criticality::Normal);
    }

    #[test]
    fn test_critical_patient() {
        let model = TriageModel::reference();
        let a = model.assess(&PatientObservation::critical_sample());

        assert_eq!(a.matrix[0], NeutrosophicTriple::new(0.0, 1.0, 0.0));
        assert!((a.aggregated.positive - 0.0049).abs() < 1e-9);
        assert!((a.aggregated.negative - 0.8917).abs() < 1e-9);
        assert!((a.aggregated.neutral - 0.1054).abs() < 1e-9);

        let labels = model.categorize(&a.aggregated);
        assert_eq!(labels.criticality, Criticality::VeryCritical);
        assert_eq!(labels.risk, Risk::VeryHigh);
    }

    #[test]
    fn test_aggregate_is_unnormalized() {
        let model = TriageModel::reference();
        let a = model.assess(&PatientObservation::stable_sample());
        assert!((a.aggregated.sum() - 1.002).abs() < 1e-6);
    }
}
