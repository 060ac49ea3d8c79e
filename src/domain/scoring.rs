//! Fuzzification of one vital sign into a neutrosophic triple.

use super::membership::{LinguisticVariable, TermRole};
use super::triple::NeutrosophicTriple;

/// Max membership degree per role (fuzzy OR), before normalization.
///
/// A role with no terms, or a non-finite value, contributes 0.
#[must_use]
pub fn raw_degrees(value: f64, variable: &LinguisticVariable) -> NeutrosophicTriple {
    let mut raw = NeutrosophicTriple::ZERO;
    for term in variable.terms() {
        let degree = term.mf.degree(value);
        // f64::max ignores NaN, so a NaN value leaves every group at 0.
        let slot = match term.role {
            TermRole::Favorable => &mut raw.positive,
            TermRole::Unfavorable => &mut raw.negative,
            TermRole::Borderline => &mut raw.neutral,
        };
        *slot = slot.max(degree);
    }
    raw
}

/// Score `value` against `variable`.
///
/// The raw group maxima are normalized to sum to 1 and rounded to 4
/// decimals. When nothing fires (far tails, NaN) the zero triple is returned.
#[must_use]
pub fn score(value: f64, variable: &LinguisticVariable) -> NeutrosophicTriple {
    let triple = raw_degrees(value, variable).normalized().rounded();
    if triple.is_degenerate() {
        tracing::debug!("{}: no membership fired for value {}", variable.name(), value);
    }
    triple
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipCatalog;
    use crate::domain::patient::Criterion;

    fn var(c: Criterion) -> &'static LinguisticVariable {
        MembershipCatalog::reference().variable(c)
    }

    fn assert_triple(t: NeutrosophicTriple, p: f64, n: f64, u: f64) {
        assert!((t.positive - p).abs() < 1e-9, "positive {} != {}", t.positive, p);
        assert!((t.negative - n).abs() < 1e-9, "negative {} != {}", t.negative, n);
        assert!((t.neutral - u).abs() < 1e-9, "neutral {} != {}", t.neutral, u);
    }

    #[test]
    fn test_raw_is_group_max() {
        let rr = var(Criterion::RespiratoryRate);
        let x = 12.0;
        let raw = raw_degrees(x, rr);

        let deg = |name: &str| rr.term(name).expect("term").mf.degree(x);
        assert_eq!(raw.positive, deg("Normal"));
        assert_eq!(raw.negative, deg("Very Low").max(deg("Very High")));
        assert_eq!(raw.neutral, deg("Low").max(deg("High")));
    }

    #[test]
    fn test_alert_is_fully_positive() {
        assert_triple(score(4.0, var(Criterion::NeuroActivity)), 1.0, 0.0, 0.0);
    }

    #[test]
    fn test_unconscious_is_fully_negative() {
        assert_triple(score(1.0, var(Criterion::NeuroActivity)), 0.0, 1.0, 0.0);
    }

    #[test]
    fn test_hyper_alert_is_negative() {
        assert_triple(score(5.0, var(Criterion::NeuroActivity)), 0.0, 1.0, 0.0);
    }

    #[test]
    fn test_reference_values() {
        assert_triple(
            score(16.0, var(Criterion::RespiratoryRate)),
            0.8723,
            0.0097,
            0.118,
        );
        assert_triple(
            score(96.0, var(Criterion::OxygenSaturation)),
            0.3749,
            0.0069,
            0.6182,
        );
        assert_triple(score(20.0, var(Criterion::HeartRate)), 0.0069, 0.6182, 0.3749);
    }

    #[test]
    fn test_normalized_sum() {
        let catalog = MembershipCatalog::reference();
        for v in catalog.variables() {
            for x in v.universe() {
                let t = score(x, v);
                if !t.is_degenerate() {
                    assert!((t.sum() - 1.0).abs() <= 1e-4 + 1e-12, "{}: {x}", v.name());
                }
                assert!(t.positive >= 0.0 && t.negative >= 0.0 && t.neutral >= 0.0);
            }
        }
    }

    #[test]
    fn test_far_tail_degenerates_to_zero() {
        let t = score(1.0e6, var(Criterion::BodyTemperature));
        assert!(t.is_degenerate());
        assert!(score(f64::NAN, var(Criterion::HeartRate)).is_degenerate());
    }

    #[test]
    fn test_out_of_domain_still_scores() {
        // 45 °C lies above the 43 °C universe but is still mostly "Very High".
        let t = score(45.0, var(Criterion::BodyTemperature));
        assert!(t.negative > 0.9);
    }
}
