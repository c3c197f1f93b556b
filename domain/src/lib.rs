//! Domain layer for glp1-advisor
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Patient profile
//!
//! A fixed questionnaire record: demographics plus closed sets of condition
//! and symptom flags. It is turned into [`Feature`]s for the remote
//! diagnostic session.
//!
//! ## Suitability
//!
//! [`assess`] is a pure decision table mapping a profile to a
//! [`SuitabilityLevel`] and the risk factors that triggered it.
//!
//! ## Assessment
//!
//! One run owns an [`AssessmentState`] that moves from collecting answers to
//! submitting them to displaying an [`AssessmentReport`]. The remote analysis
//! and the local verdict sit side by side and are never reconciled.

pub mod assessment;
pub mod config;
pub mod core;
pub mod diagnosis;
pub mod patient;
pub mod suitability;

// Re-export commonly used types
pub use assessment::{
    bundle::ResultBundle,
    report::{AnalysisSource, AssessmentReport, RemoteAnalysis},
    state::{AssessmentPhase, AssessmentState},
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use diagnosis::{
    analysis::{AnalysisReport, CandidateCondition},
    session::SessionId,
};
pub use patient::{
    feature::{FLAG_VALUE, Feature},
    profile::{
        AGE_RANGE, BMI_RANGE, Condition, ConditionFlags, Demographics, Gender, PatientProfile,
        Symptom, SymptomFlags, WEIGHT_RANGE,
    },
};
pub use suitability::{
    scorer::{OBESITY_BMI_THRESHOLD, assess, risk_factors},
    verdict::{RiskFactor, SuitabilityLevel, SuitabilityVerdict},
};
