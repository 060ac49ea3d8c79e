//! Domain layer: the scoring and ranking pipeline.
//!
//! Pure Rust types with no I/O. Data flows
//! vitals -> `scoring` (x7) -> `aggregation` -> `ranking` -> `category`,
//! and `Cohort` drives the whole pipeline on every mutation.

pub mod aggregation;
pub mod category;
mod cohort;
pub mod membership;
mod model;
mod patient;
pub mod ranking;
pub mod scoring;
mod triple;

pub use aggregation::CriterionWeights;
pub use category::{Categorizer, CategoryLabels, Criticality, Risk, Uncertainty};
pub use cohort::{Cohort, PatientRecord};
pub use membership::{LinguisticVariable, MembershipCatalog, TermRole};
pub use model::{PatientAssessment, TriageModel};
pub use patient::{Criterion, PatientObservation, CRITERIA_COUNT};
pub use ranking::{ClosenessScore, CohortRanking, IdealSolutions};
pub use triple::{round4, NeutrosophicTriple};
