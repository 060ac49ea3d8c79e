//! Qualitative labels for aggregated triples.
//!
//! Each component is mapped through the same five half-open bands
//! `[0,0.2) [0.2,0.4) [0.4,0.6) [0.6,0.8) [0.8,1]` into its own vocabulary.

use serde::{Deserialize, Serialize};

use super::triple::NeutrosophicTriple;

/// Lower bounds of bands 1..=4; band 0 starts at 0.
const BAND_EDGES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Default slack around [0, 1]. Aggregated triples are not renormalized and
/// can exceed 1 by the weight surplus (0.002).
pub const DEFAULT_TOLERANCE: f64 = 0.005;

/// Criticality, read from the positive component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    VeryCritical,
    Critical,
    Unstable,
    NearNormal,
    Normal,
    OutOfRange,
}

impl Criticality {
    fn from_band(band: Option<usize>) -> Self {
        match band {
            Some(0) => Self::VeryCritical,
            Some(1) => Self::Critical,
            Some(2) => Self::Unstable,
            Some(3) => Self::NearNormal,
            Some(_) => Self::Normal,
            None => Self::OutOfRange,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryCritical => "very critical",
            Self::Critical => "critical",
            Self::Unstable => "unstable",
            Self::NearNormal => "near-normal limits",
            Self::Normal => "normal",
            Self::OutOfRange => "out of valid range",
        }
    }

    /// Severity ordinal for display: 4 = very critical .. 0 = normal.
    #[must_use]
    pub fn severity(&self) -> Option<u8> {
        match self {
            Self::VeryCritical => Some(4),
            Self::Critical => Some(3),
            Self::Unstable => Some(2),
            Self::NearNormal => Some(1),
            Self::Normal => Some(0),
            Self::OutOfRange => None,
        }
    }
}

/// Risk, read from the negative component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
    OutOfRange,
}

impl Risk {
    fn from_band(band: Option<usize>) -> Self {
        match band {
            Some(0) => Self::VeryLow,
            Some(1) => Self::Low,
            Some(2) => Self::Moderate,
            Some(3) => Self::High,
            Some(_) => Self::VeryHigh,
            None => Self::OutOfRange,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "very low risk",
            Self::Low => "low risk",
            Self::Moderate => "moderate risk",
            Self::High => "high risk",
            Self::VeryHigh => "very high risk",
            Self::OutOfRange => "out of valid range",
        }
    }

    /// Severity ordinal for display: 4 = very high risk .. 0 = very low.
    #[must_use]
    pub fn severity(&self) -> Option<u8> {
        match self {
            Self::VeryLow => Some(0),
            Self::Low => Some(1),
            Self::Moderate => Some(2),
            Self::High => Some(3),
            Self::VeryHigh => Some(4),
            Self::OutOfRange => None,
        }
    }
}

/// Uncertainty, read from the neutral component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Uncertainty {
    VeryLittle,
    Little,
    Moderate,
    Considerable,
    Much,
    OutOfRange,
}

impl Uncertainty {
    fn from_band(band: Option<usize>) -> Self {
        match band {
            Some(0) => Self::VeryLittle,
            Some(1) => Self::Little,
            Some(2) => Self::Moderate,
            Some(3) => Self::Considerable,
            Some(_) => Self::Much,
            None => Self::OutOfRange,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLittle => "very little uncertainty",
            Self::Little => "little uncertainty",
            Self::Moderate => "moderate uncertainty",
            Self::Considerable => "considerable uncertainty",
            Self::Much => "much uncertainty",
            Self::OutOfRange => "out of valid range",
        }
    }
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three labels of one aggregated triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabels {
    pub criticality: Criticality,
    pub risk: Risk,
    pub uncertainty: Uncertainty,
}

/// Maps triple components to labels via fixed bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Categorizer {
    tolerance: f64,
}

/// Folds values within [`DEFAULT_TOLERANCE`] of [0, 1] into the end bands
/// instead of labelling them out of range, so the 1.002 weight surplus stays
/// categorizable. Use [`Categorizer::with_tolerance`] with `0.0` for strict bounds.
impl Default for Categorizer {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Categorizer {
    /// Categorizer with explicit slack around [0, 1]; 0 means strict bounds.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Band index 0..=4, or `None` outside [-tolerance, 1 + tolerance] or NaN.
    #[must_use]
    pub fn band(&self, value: f64) -> Option<usize> {
        if !(-self.tolerance..=1.0 + self.tolerance).contains(&value) {
            return None;
        }
        Some(BAND_EDGES.iter().filter(|&&edge| value >= edge).count())
    }

    #[must_use]
    pub fn categorize(&self, triple: &NeutrosophicTriple) -> CategoryLabels {
        CategoryLabels {
            criticality: Criticality::from_band(self.band(triple.positive)),
            risk: Risk::from_band(self.band(triple.negative)),
            uncertainty: Uncertainty::from_band(self.band(triple.neutral)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_are_half_open() {
        let c = Categorizer::with_tolerance(0.0);
        assert_eq!(c.band(0.0), Some(0));
        assert_eq!(c.band(0.1999), Some(0));
        assert_eq!(c.band(0.2), Some(1));
        assert_eq!(c.band(0.4), Some(2));
        assert_eq!(c.band(0.6), Some(3));
        assert_eq!(c.band(0.8), Some(4));
        assert_eq!(c.band(1.0), Some(4));
    }

    #[test]
    fn test_out_of_range_labels() {
        let c = Categorizer::with_tolerance(0.0);
        let labels = c.categorize(&NeutrosophicTriple::new(1.2, -0.1, f64::NAN));
        assert_eq!(labels.criticality, Criticality::OutOfRange);
        assert_eq!(labels.risk, Risk::OutOfRange);
        assert_eq!(labels.uncertainty, Uncertainty::OutOfRange);
        assert_eq!(labels.risk.to_string(), "out of valid range");
    }

    #[test]
    fn test_weight_surplus_is_tolerated() {
        // A perfectly normal patient aggregates to 1.002 positive.
        let labels = Categorizer::default().categorize(&NeutrosophicTriple::new(1.002, 0.0, 0.0));
        assert_eq!(labels.criticality, Criticality::Normal);
        assert_eq!(labels.risk, Risk::VeryLow);
        assert_eq!(labels.uncertainty, Uncertainty::VeryLittle);

        let strict = Categorizer::with_tolerance(0.0);
        assert_eq!(
            strict.categorize(&NeutrosophicTriple::new(1.002, 0.0, 0.0)).criticality,
            Criticality::OutOfRange
        );
    }

    #[test]
    fn test_stable_and_critical_labels() {
        let c = Categorizer::default();

        let stable = c.categorize(&NeutrosophicTriple::new(0.8957, 0.0182, 0.0881));
        assert_eq!(stable.criticality.label(), "normal");
        assert_eq!(stable.risk.label(), "very low risk");
        assert_eq!(stable.uncertainty.label(), "very little uncertainty");

        let critical = c.categorize(&NeutrosophicTriple::new(0.0049, 0.8917, 0.1054));
        assert_eq!(critical.criticality.label(), "very critical");
        assert_eq!(critical.risk.label(), "very high risk");
    }

    #[test]
    fn test_vocabularies() {
        let c = Categorizer::default();
        let labels = c.categorize(&NeutrosophicTriple::new(0.5, 0.3, 0.7));
        assert_eq!(labels.criticality.to_string(), "unstable");
        assert_eq!(labels.risk.to_string(), "low risk");
        assert_eq!(labels.uncertainty.to_string(), "considerable uncertainty");
    }
}
