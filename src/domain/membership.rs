//! Membership catalog: the seven linguistic variables of the triage model.
//!
//! Every variable is a family of Gaussian fuzzy sets over a vital sign, and
//! every term is assigned one of three roles that decide which component of
//! the neutrosophic triple it feeds. The table is a `static`; nothing in the
//! crate can mutate it.

use serde::{Deserialize, Serialize};

use super::patient::{Criterion, CRITERIA_COUNT};

/// Semantic group of a linguistic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermRole {
    /// Feeds the positive (normal) component
    Favorable,
    /// Feeds the negative (critical) component
    Unfavorable,
    /// Feeds the neutral (uncertain) component
    Borderline,
}

/// Gaussian membership function `exp(-0.5 * ((x - mean) / sigma)^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianMf {
    pub mean: f64,
    pub sigma: f64,
}

impl GaussianMf {
    #[must_use]
    pub const fn new(mean: f64, sigma: f64) -> Self {
        Self { mean, sigma }
    }

    /// Degree of membership of `x`, in [0, 1].
    #[must_use]
    pub fn degree(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.sigma;
        (-0.5 * z * z).exp()
    }
}

/// A named fuzzy set of a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub name: &'static str,
    pub mf: GaussianMf,
    pub role: TermRole,
}

impl Term {
    const fn new(name: &'static str, mean: f64, sigma: f64, role: TermRole) -> Self {
        Self {
            name,
            mf: GaussianMf::new(mean, sigma),
            role,
        }
    }
}

/// Declared display range of a variable. Not used by scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Universe {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Inclusive bounds check.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Sampling grid from `min` to `max` inclusive.
    #[must_use]
    pub fn samples(&self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.step).round() as usize + 1;
        (0..n).map(|i| self.min + i as f64 * self.step).collect()
    }
}

/// A vital sign described by linguistic terms.
#[derive(Debug)]
pub struct LinguisticVariable {
    criterion: Criterion,
    universe: Universe,
    terms: &'static [Term],
}

impl LinguisticVariable {
    #[must_use]
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.criterion.name()
    }

    #[must_use]
    pub fn domain(&self) -> Universe {
        self.universe
    }

    /// Terms in declaration order.
    #[must_use]
    pub fn terms(&self) -> &'static [Term] {
        self.terms
    }

    /// Look up a term by its name.
    #[must_use]
    pub fn term(&self, name: &str) -> Option<&'static Term> {
        self.terms.iter().find(|t| t.name == name)
    }

    /// Names of the terms playing `role`.
    #[must_use]
    pub fn terms_with_role(&self, role: TermRole) -> Vec<&'static str> {
        self.terms
            .iter()
            .filter(|t| t.role == role)
            .map(|t| t.name)
            .collect()
    }

    /// Sampling grid over the declared universe.
    #[must_use]
    pub fn universe(&self) -> Vec<f64> {
        self.universe.samples()
    }

    /// Membership curve of one term sampled over the universe.
    #[must_use]
    pub fn curve(&self, term: &str) -> Option<Vec<(f64, f64)>> {
        let term = self.term(term)?;
        Some(
            self.universe()
                .into_iter()
                .map(|x| (x, term.mf.degree(x)))
                .collect(),
        )
    }
}

use TermRole::{Borderline, Favorable, Unfavorable};

const NEURO_TERMS: [Term; 5] = [
    Term::new("Unconscious", 1.0, 0.1, Unfavorable),
    Term::new("Responds to Pain", 2.0, 0.1, Unfavorable),
    Term::new("Responds to Voice", 3.0, 0.1, Borderline),
    Term::new("Alert", 4.0, 0.1, Favorable),
    Term::new("Hyper-alert", 5.0, 0.1, Unfavorable),
];

const RESPIRATORY_TERMS: [Term; 5] = [
    Term::new("Very Low", 4.0, 4.0, Unfavorable),
    Term::new("Low", 10.0, 2.0, Borderline),
    Term::new("Normal", 16.0, 4.0, Favorable),
    Term::new("High", 24.0, 4.0, Borderline),
    Term::new("Very High", 30.0, 4.0, Unfavorable),
];

const SATURATION_TERMS: [Term; 5] = [
    Term::new("Very Low", 60.0, 10.0, Unfavorable),
    Term::new("Low", 80.0, 10.0, Borderline),
    Term::new("Normal", 93.0, 3.0, Favorable),
    Term::new("High", 96.0, 1.0, Borderline),
    Term::new("Very High", 99.0, 1.0, Unfavorable),
];

const HEART_RATE_TERMS: [Term; 5] = [
    Term::new("Very Low", 20.0, 20.0, Unfavorable),
    Term::new("Low", 40.0, 20.0, Borderline),
    Term::new("Normal", 80.0, 20.0, Favorable),
    Term::new("High", 120.0, 20.0, Borderline),
    Term::new("Very High", 180.0, 40.0, Unfavorable),
];

const SYSTOLIC_TERMS: [Term; 5] = [
    Term::new("Very Low", 60.0, 10.0, Unfavorable),
    Term::new("Low", 80.0, 10.0, Borderline),
    Term::new("Normal", 105.0, 15.0, Favorable),
    Term::new("High", 140.0, 20.0, Borderline),
    Term::new("Very High", 200.0, 40.0, Unfavorable),
];

const DIASTOLIC_TERMS: [Term; 5] = [
    Term::new("Very Low", 30.0, 10.0, Unfavorable),
    Term::new("Low", 50.0, 10.0, Borderline),
    Term::new("Normal", 70.0, 10.0, Favorable),
    Term::new("High", 90.0, 10.0, Borderline),
    Term::new("Very High", 120.0, 20.0, Unfavorable),
];

const TEMPERATURE_TERMS: [Term; 5] = [
    Term::new("Very Low", 33.0, 1.0, Unfavorable),
    Term::new("Low", 35.0, 1.0, Borderline),
    Term::new("Normal", 37.0, 1.0, Favorable),
    Term::new("High", 39.0, 1.0, Borderline),
    Term::new("Very High", 41.0, 1.0, Unfavorable),
];

static REFERENCE_CATALOG: MembershipCatalog = MembershipCatalog {
    variables: [
        LinguisticVariable {
            criterion: Criterion::NeuroActivity,
            universe: Universe::new(1.0, 5.0, 0.1),
            terms: &NEURO_TERMS,
        },
        LinguisticVariable {
            criterion: Criterion::RespiratoryRate,
            universe: Universe::new(0.0, 50.0, 1.0),
            terms: &RESPIRATORY_TERMS,
        },
        LinguisticVariable {
            criterion: Criterion::OxygenSaturation,
            universe: Universe::new(0.0, 100.0, 1.0),
            terms: &SATURATION_TERMS,
        },
        LinguisticVariable {
            criterion: Criterion::HeartRate,
            universe: Universe::new(0.0, 300.0, 1.0),
            terms: &HEART_RATE_TERMS,
        },
        LinguisticVariable {
            criterion: Criterion::SystolicBp,
            universe: Universe::new(0.0, 250.0, 1.0),
            terms: &SYSTOLIC_TERMS,
        },
        LinguisticVariable {
            criterion: Criterion::DiastolicBp,
            universe: Universe::new(0.0, 130.0, 1.0),
            terms: &DIASTOLIC_TERMS,
        },
        LinguisticVariable {
            criterion: Criterion::BodyTemperature,
            universe: Universe::new(32.0, 43.0, 1.0),
            terms: &TEMPERATURE_TERMS,
        },
    ],
};

/// The seven linguistic variables, indexed by criterion.
#[derive(Debug)]
pub struct MembershipCatalog {
    variables: [LinguisticVariable; CRITERIA_COUNT],
}

impl MembershipCatalog {
    /// The process-wide reference model.
    #[must_use]
    pub fn reference() -> &'static Self {
        &REFERENCE_CATALOG
    }

    #[must_use]
    pub fn variable(&self, criterion: Criterion) -> &LinguisticVariable {
        &self.variables[criterion.index()]
    }

    /// Look up a variable by its display name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&LinguisticVariable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    /// Variables in criterion order.
    #[must_use]
    pub fn variables(&self) -> &[LinguisticVariable] {
        &self.variables
    }
}
