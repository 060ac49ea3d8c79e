//! Patient vital-sign observations.
//!
//! Seven criteria, always in the same order: neuro-activity, respiratory
//! rate, oxygen saturation, heart rate, systolic and diastolic blood
//! pressure, body temperature.

use serde::{Deserialize, Serialize};

/// Number of scored criteria per patient.
pub const CRITERIA_COUNT: usize = 7;

/// One vital sign used as a ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    NeuroActivity,
    RespiratoryRate,
    OxygenSaturation,
    HeartRate,
    SystolicBp,
    DiastolicBp,
    BodyTemperature,
}

impl Criterion {
    /// All criteria in declaration order.
    pub const ALL: [Criterion; CRITERIA_COUNT] = [
        Self::NeuroActivity,
        Self::RespiratoryRate,
        Self::OxygenSaturation,
        Self::HeartRate,
        Self::SystolicBp,
        Self::DiastolicBp,
        Self::BodyTemperature,
    ];

    /// Position of this criterion in observation vectors and weight tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::NeuroActivity => 0,
            Self::RespiratoryRate => 1,
            Self::OxygenSaturation => 2,
            Self::HeartRate => 3,
            Self::SystolicBp => 4,
            Self::DiastolicBp => 5,
            Self::BodyTemperature => 6,
        }
    }

    /// Human-readable name, also used as the linguistic variable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NeuroActivity => "Neuro-activity",
            Self::RespiratoryRate => "Respiratory Rate",
            Self::OxygenSaturation => "Oxygen Saturation",
            Self::HeartRate => "Heart Rate",
            Self::SystolicBp => "Systolic BP",
            Self::DiastolicBp => "Diastolic BP",
            Self::BodyTemperature => "Body Temperature",
        }
    }

    /// Short column header for tables.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::NeuroActivity => "Neuro",
            Self::RespiratoryRate => "RR",
            Self::OxygenSaturation => "SpO2",
            Self::HeartRate => "HR",
            Self::SystolicBp => "SBP",
            Self::DiastolicBp => "DBP",
            Self::BodyTemperature => "Temp",
        }
    }

    /// Unit shown next to entered values.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::NeuroActivity => "AVPU 1-5",
            Self::RespiratoryRate => "breaths/min",
            Self::OxygenSaturation => "%",
            Self::HeartRate => "bpm",
            Self::SystolicBp | Self::DiastolicBp => "mmHg",
            Self::BodyTemperature => "°C",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw vitals for one patient, one value per criterion.
///
/// Values outside a variable's declared domain are accepted; they simply land
/// in the Gaussian tails and produce near-zero memberships.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientObservation {
    /// AVPU-style level: 1 unconscious .. 4 alert .. 5 hyper-alert
    pub neuro_activity: f64,

    /// Breaths per minute
    pub respiratory_rate: f64,

    /// Peripheral oxygen saturation (%)
    pub oxygen_saturation: f64,

    /// Beats per minute
    pub heart_rate: f64,

    /// Systolic blood pressure (mmHg)
    pub systolic_bp: f64,

    /// Diastolic blood pressure (mmHg)
    pub diastolic_bp: f64,

    /// Body temperature (°C)
    pub body_temperature: f64,
}

impl Default for PatientObservation {
    /// Starting values of the entry form.
    fn default() -> Self {
        Self {
            neuro_activity: 3.0,
            respiratory_rate: 20.0,
            oxygen_saturation: 95.0,
            heart_rate: 80.0,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            body_temperature: 37.0,
        }
    }
}

impl PatientObservation {
    /// Near-ideal adult: alert, eupneic, normotensive, afebrile.
    #[must_use]
    pub const fn stable_sample() -> Self {
        Self {
            neuro_activity: 4.0,
            respiratory_rate: 16.0,
            oxygen_saturation: 96.0,
            heart_rate: 80.0,
            systolic_bp: 105.0,
            diastolic_bp: 70.0,
            body_temperature: 37.0,
        }
    }

    /// Unconscious, bradypneic, hypoxic, bradycardic, hypotensive, hypothermic.
    #[must_use]
    pub const fn critical_sample() -> Self {
        Self {
            neuro_activity: 1.0,
            respiratory_rate: 4.0,
            oxygen_saturation: 60.0,
            heart_rate: 20.0,
            systolic_bp: 60.0,
            diastolic_bp: 30.0,
            body_temperature: 33.0,
        }
    }

    /// Values in criterion order.
    #[must_use]
    pub fn to_array(&self) -> [f64; CRITERIA_COUNT] {
        [
            self.neuro_activity,
            self.respiratory_rate,
            self.oxygen_saturation,
            self.heart_rate,
            self.systolic_bp,
            self.diastolic_bp,
            self.body_temperature,
        ]
    }

    /// Build an observation from values in criterion order.
    ///
    /// # Errors
    /// Returns error if the slice does not hold exactly 7 values.
    pub fn from_slice(v: &[f64]) -> Result<Self, String> {
        if v.len() != CRITERIA_COUNT {
            return Err(format!(
                "Expected {CRITERIA_COUNT} vital signs, got {}",
                v.len()
            ));
        }

        Ok(Self {
            neuro_activity: v[0],
            respiratory_rate: v[1],
            oxygen_saturation: v[2],
            heart_rate: v[3],
            systolic_bp: v[4],
            diastolic_bp: v[5],
            body_temperature: v[6],
        })
    }

    /// Value recorded for one criterion.
    #[must_use]
    pub fn value(&self, criterion: Criterion) -> f64 {
        self.to_array()[criterion.index()]
    }

    /// Criteria whose value falls outside the variable's declared domain.
    ///
    /// This is informational only; scoring accepts any value.
    #[must_use]
    pub fn out_of_domain(&self) -> Vec<Criterion> {
        let catalog = super::membership::MembershipCatalog::reference();
        Criterion::ALL
            .into_iter()
            .filter(|&c| !catalog.variable(c).domain().contains(self.value(c)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_order() {
        for (i, c) in Criterion::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_observation_to_array() {
        let obs = PatientObservation::stable_sample();
        let arr = obs.to_array();
        assert!((arr[0] - 4.0).abs() < f64::EPSILON);
        assert!((arr[6] - 37.0).abs() < f64::EPSILON);
        assert!((obs.value(Criterion::HeartRate) - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_observation_from_slice() {
        let v = [1.0, 4.0, 60.0, 20.0, 60.0, 30.0, 33.0];
        let obs = PatientObservation::from_slice(&v).expect("Should parse");
        assert_eq!(obs, PatientObservation::critical_sample());

        let err = PatientObservation::from_slice(&v[..6]).unwrap_err();
        assert!(err.contains("got 6"));
    }

    #[test]
    fn test_out_of_domain_is_informational() {
        assert!(PatientObservation::stable_sample().out_of_domain().is_empty());

        let obs = PatientObservation {
            heart_rate: 350.0,
            body_temperature: 30.0,
            ..PatientObservation::stable_sample()
        };
        assert_eq!(
            obs.out_of_domain(),
            vec![Criterion::HeartRate, Criterion::BodyTemperature]
        );
    }

    #[test]
    fn test_observation_json_field_names() {
        let json = r#"{"neuro_activity":4,"respiratory_rate":16,"oxygen_saturation":96,
            "heart_rate":80,"systolic_bp":105,"diastolic_bp":70,"body_temperature":37}"#;
        let obs: PatientObservation = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(obs, PatientObservation::stable_sample());
    }
}
