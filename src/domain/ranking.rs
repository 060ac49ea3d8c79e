//! TOPSIS-style relative ranking over a cohort of aggregated triples.
//!
//! Reference points are synthesized from the cohort extremes, so every score
//! here is cohort-relative and must be recomputed whenever the cohort changes.

use serde::{Deserialize, Serialize};

use super::triple::NeutrosophicTriple;

/// Closeness assigned when a patient is at zero distance from both reference
/// points (single-patient or fully tied cohort).
pub const DEGENERATE_CLOSENESS: f64 = 0.5;

/// Positive and negative ideal solutions of a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealSolutions {
    /// (max positive, min negative, min neutral)
    pub best: NeutrosophicTriple,
    /// (min positive, max negative, max neutral)
    pub worst: NeutrosophicTriple,
}

impl IdealSolutions {
    /// Compute PIS/NIS; `None` for an empty cohort.
    #[must_use]
    pub fn from_cohort(triples: &[NeutrosophicTriple]) -> Option<Self> {
        let first = triples.first()?;
        let mut best = *first;
        let mut worst = *first;

        for t in &triples[1..] {
            best.positive = best.positive.max(t.positive);
            best.negative = best.negative.min(t.negative);
            best.neutral = best.neutral.min(t.neutral);

            worst.positive = worst.positive.min(t.positive);
            worst.negative = worst.negative.max(t.negative);
            worst.neutral = worst.neutral.max(t.neutral);
        }

        Some(Self { best, worst })
    }

    /// True when the cohort has no spread at all.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.best == self.worst
    }
}

/// Relative position of one patient within the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosenessScore {
    /// Euclidean distance to the positive ideal solution (D+)
    pub distance_to_best: f64,
    /// Euclidean distance to the negative ideal solution (D-)
    pub distance_to_worst: f64,
    /// D- / (D+ + D-), in [0, 1]
    pub closeness: f64,
    /// Dense rank by ascending closeness; 1 is the most urgent
    pub rank: usize,
}

/// Closeness coefficient `d_worst / (d_best + d_worst)`.
///
/// Returns [`DEGENERATE_CLOSENESS`] when both distances are zero.
#[must_use]
pub fn closeness_coefficient(distance_to_best: f64, distance_to_worst: f64) -> f64 {
    let total = distance_to_best + distance_to_worst;
    if total > 0.0 {
        distance_to_worst / total
    } else {
        DEGENERATE_CLOSENESS
    }
}

/// Dense ranks by ascending value: equal values share a rank, no gaps.
#[must_use]
pub fn dense_ranks(values: &[f64]) -> Vec<usize> {
    let mut distinct: Vec<f64> = values.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();

    values
        .iter()
        .map(|v| {
            distinct
                .binary_search_by(|d| d.total_cmp(v))
                .map_or(distinct.len(), |i| i + 1)
        })
        .collect()
}

/// Full cohort ranking result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRanking {
    /// `None` when the cohort is empty
    pub ideal: Option<IdealSolutions>,
    /// One score per input triple, in input order
    pub scores: Vec<ClosenessScore>,
}

/// Rank a cohort of aggregated triples.
///
/// An empty cohort yields no scores.
#[must_use]
pub fn rank(triples: &[NeutrosophicTriple]) -> CohortRanking {
    let Some(ideal) = IdealSolutions::from_cohort(triples) else {
        return CohortRanking {
            ideal: None,
            scores: Vec::new(),
        };
    };

    let distances: Vec<(f64, f64)> = triples
        .iter()
        .map(|t| (t.distance(&ideal.best), t.distance(&ideal.worst)))
        .collect();

    let closeness: Vec<f64> = distances
        .iter()
        .map(|&(d_best, d_worst)| closeness_coefficient(d_best, d_worst))
        .collect();

    let degenerate = distances.iter().filter(|(b, w)| b + w == 0.0).count();
    if degenerate > 0 {
        tracing::warn!(
            "{} of {} patients at zero distance from both ideal solutions; closeness set to {}",
            degenerate,
            triples.len(),
            DEGENERATE_CLOSENESS
        );
    }

    let ranks = dense_ranks(&closeness);

    let scores = distances
        .into_iter()
        .zip(closeness)
        .zip(ranks)
        .map(|(((distance_to_best, distance_to_worst), closeness), rank)| ClosenessScore {
            distance_to_best,
            distance_to_worst,
            closeness,
            rank,
        })
        .collect();

    CohortRanking {
        ideal: Some(ideal),
        scores,
    }
}
