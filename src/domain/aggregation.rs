//! Weighted aggregation of the seven per-criterion triples.

use serde::{Deserialize, Serialize};

use super::patient::{Criterion, CRITERIA_COUNT};
use super::triple::NeutrosophicTriple;

/// Per-criterion importance weights, in criterion order.
///
/// Weights are fixed model inputs; they are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights([f64; CRITERIA_COUNT]);

impl CriterionWeights {
    /// Reference weights of the triage model (sum 1.002).
    pub const REFERENCE: Self = Self([0.3384, 0.2413, 0.0123, 0.2057, 0.0902, 0.1054, 0.0087]);

    #[must_use]
    pub const fn new(weights: [f64; CRITERIA_COUNT]) -> Self {
        Self(weights)
    }

    #[must_use]
    pub fn weight(&self, criterion: Criterion) -> f64 {
        self.0[criterion.index()]
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Each criterion triple scaled by its weight, rounded to 4 decimals.
    #[must_use]
    pub fn weighted(
        &self,
        triples: &[NeutrosophicTriple; CRITERIA_COUNT],
    ) -> [NeutrosophicTriple; CRITERIA_COUNT] {
        std::array::from_fn(|i| triples[i].scaled(self.0[i]).rounded())
    }

    /// Sum of the rounded weighted triples, itself rounded to 4 decimals.
    ///
    /// Rounding happens per criterion before summing. No renormalization is
    /// applied, so the result sums to roughly the weight total.
    #[must_use]
    pub fn aggregate(&self, triples: &[NeutrosophicTriple; CRITERIA_COUNT]) -> NeutrosophicTriple {
        self.weighted(triples)
            .iter()
            .fold(NeutrosophicTriple::ZERO, |acc, t| acc.plus(t))
            .rounded()
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(p: f64, n: f64, u: f64) -> NeutrosophicTriple {
        NeutrosophicTriple::new(p, n, u)
    }

    #[test]
    fn test_reference_weight_total() {
        assert!((CriterionWeights::REFERENCE.total() - 1.002).abs() < 1e-9);
        assert!((CriterionWeights::REFERENCE.weight(Criterion::HeartRate) - 0.2057).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_hand_computed() {
        // Per-criterion triples of the stable sample patient.
        let triples = [
            t(1.0, 0.0, 0.0),
            t(0.8723, 0.0097, 0.118),
            t(0.3749, 0.0069, 0.6182),
            t(0.848, 0.0373, 0.1148),
            t(0.7838, 0.0467, 0.1695),
            t(0.848, 0.0373, 0.1148),
            t(0.8805, 0.0003, 0.1192),
        ];

        let weighted = CriterionWeights::REFERENCE.weighted(&triples);
        // 0.8723 * 0.2413 = 0.21048599 -> 0.2105
        assert!((weighted[1].positive - 0.2105).abs() < 1e-12);
        // 0.0003 * 0.0087 = 0.00000261 -> 0.0
        assert_eq!(weighted[6].negative, 0.0);

        let agg = CriterionWeights::REFERENCE.aggregate(&triples);
        // positive: 0.3384 + 0.2105 + 0.0046 + 0.1744 + 0.0707 + 0.0894 + 0.0077
        assert!((agg.positive - 0.8957).abs() < 1e-9);
        assert!((agg.negative - 0.0182).abs() < 1e-9);
        assert!((agg.neutral - 0.0881).abs() < 1e-9);
        assert!((agg.sum() - 1.002).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_before_summing() {
        // Seven contributions of 0.00004 each vanish when rounded first.
        let triples = [t(0.00004 / 0.3384, 0.0, 0.0); 7];
        let weights = CriterionWeights::new([0.3384; 7]);
        assert_eq!(weights.aggregate(&triples).positive, 0.0);
    }

    #[test]
    fn test_uniform_weights() {
        let triples = [t(0.5, 0.25, 0.25); 7];
        let weights = CriterionWeights::new([1.0 / 7.0; 7]);
        let agg = weights.aggregate(&triples);
        assert!((agg.positive - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_half_ties_round_to_even() {
        use crate::domain::{PatientObservation, TriageModel};

        let observation = PatientObservation {
            respiratory_rate: 20.16,
            ..PatientObservation::stable_sample()
        };
        let assessment = TriageModel::reference().assess(&observation);
        let rr = assessment.matrix[Criterion::RespiratoryRate.index()];
        assert!((rr.neutral - 0.5).abs() < 1e-12);

        // 0.5 * 0.2413 sits exactly on 0.12065
        let weighted = CriterionWeights::REFERENCE.weighted(&assessment.matrix);
        assert!((weighted[Criterion::RespiratoryRate.index()].neutral - 0.1206).abs() < 1e-9);
        assert!((assessment.aggregated.neutral - 0.1802).abs() < 1e-9);
    }
}
