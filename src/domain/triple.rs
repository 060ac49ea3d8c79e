//! Neutrosophic truth triples.
//!
//! A triple carries three independent degrees for one fuzzy observation:
//! how normal it is (positive), how critical it is (negative) and how
//! uncertain it is (neutral).

use serde::{Deserialize, Serialize};

/// Number of decimal digits every published triple component is rounded to.
pub const DECIMALS: i32 = 4;

/// Round to the fixed 4-decimal precision used throughout the pipeline.
///
/// Exact halves round to the even digit, so `0.5 * 0.2413` gives `0.1206`.
#[must_use]
pub fn round4(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// (positive, negative, neutral) degree-of-truth triple.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NeutrosophicTriple {
    /// Degree of normalcy
    pub positive: f64,
    /// Degree of criticality
    pub negative: f64,
    /// Degree of uncertainty
    pub neutral: f64,
}

impl NeutrosophicTriple {
    /// The all-zero triple produced when no membership function fires.
    pub const ZERO: Self = Self {
        positive: 0.0,
        negative: 0.0,
        neutral: 0.0,
    };

    #[must_use]
    pub const fn new(positive: f64, negative: f64, neutral: f64) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    /// Sum of the three components.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// True when every component is exactly zero.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.positive == 0.0 && self.negative == 0.0 && self.neutral == 0.0
    }

    /// Divide each component by the sum; the all-zero triple is returned as is.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total > 0.0 {
            Self::new(
                self.positive / total,
                self.negative / total,
                self.neutral / total,
            )
        } else {
            Self::ZERO
        }
    }

    /// Componentwise rounding to 4 decimals.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::new(
            round4(self.positive),
            round4(self.negative),
            round4(self.neutral),
        )
    }

    /// Multiply every component by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.positive * factor,
            self.negative * factor,
            self.neutral * factor,
        )
    }

    /// Componentwise addition.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(
            self.positive + other.positive,
            self.negative + other.negative,
            self.neutral + other.neutral,
        )
    }

    /// Euclidean distance in the 3-dimensional triple space.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dp = self.positive - other.positive;
        let dn = self.negative - other.negative;
        let du = self.neutral - other.neutral;
        (dp * dp + dn * dn + du * du).sqrt()
    }

    /// Components in (positive, negative, neutral) order.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.positive, self.negative, self.neutral]
    }
}

impl std::fmt::Display for NeutrosophicTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}, {:.4})",
            self.positive, self.negative, self.neutral
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round4() {
        assert!((round4(0.123_456) - 0.1235).abs() < 1e-12);
        assert!((round4(0.999_96) - 1.0).abs() < 1e-12);
        assert_eq!(round4(0.0), 0.0);
    }

    #[test]
    fn test_round4_ties_to_even() {
        assert!((round4(0.5 * 0.2413) - 0.1206).abs() < 1e-12);
        assert!((round4(0.000_25) - 0.0002).abs() < 1e-12);
        assert!((round4(-0.5 * 0.2413) + 0.1206).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let t = NeutrosophicTriple::new(0.6, 0.2, 0.4).normalized();
        assert!((t.sum() - 1.0).abs() < 1e-12);
        assert!((t.positive - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_keeps_degenerate_zero() {
        let t = NeutrosophicTriple::ZERO.normalized();
        assert!(t.is_degenerate());
    }

    #[test]
    fn test_distance() {
        let a = NeutrosophicTriple::new(0.0, 0.0, 0.0);
        let b = NeutrosophicTriple::new(1.0, 2.0, 2.0);
        assert!((a.distance(&b) - 3.0).abs() < 1e-12);
        assert_eq!(b.distance(&b), 0.0);
    }
}
