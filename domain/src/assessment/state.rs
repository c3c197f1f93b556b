//! Assessment lifecycle state
//!
//! One `AssessmentState` is owned by one run and moves through
//! `Collecting -> Submitting -> Displaying`. `reset` starts over.

use super::report::AssessmentReport;
use crate::core::error::DomainError;
use crate::patient::profile::PatientProfile;
use serde::{Deserialize, Serialize};

/// Where an assessment is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentPhase {
    /// Questionnaire answers are still being gathered
    Collecting,
    /// Answers are being pushed to the diagnostic service
    Submitting,
    /// Results are available
    Displaying,
}

impl AssessmentPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentPhase::Collecting => "collecting",
            AssessmentPhase::Submitting => "submitting",
            AssessmentPhase::Displaying => "displaying",
        }
    }
}

impl std::fmt::Display for AssessmentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit per-run state (Entity)
#[derive(Debug, Clone)]
pub struct AssessmentState {
    phase: AssessmentPhase,
    profile: Option<PatientProfile>,
    report: Option<AssessmentReport>,
}

impl Default for AssessmentState {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentState {
    pub fn new() -> Self {
        Self {
            phase: AssessmentPhase::Collecting,
            profile: None,
            report: None,
        }
    }

    pub fn phase(&self) -> AssessmentPhase {
        self.phase
    }

    pub fn profile(&self) -> Option<&PatientProfile> {
        self.profile.as_ref()
    }

    pub fn report(&self) -> Option<&AssessmentReport> {
        self.report.as_ref()
    }

    /// Collecting -> Submitting. The profile must validate.
    pub fn begin_submission(&mut self, profile: PatientProfile) -> Result<(), DomainError> {
        self.expect(AssessmentPhase::Collecting, "submit")?;
        profile.validate()?;
        self.profile = Some(profile);
        self.phase = AssessmentPhase::Submitting;
        Ok(())
    }

    /// Submitting -> Displaying
    pub fn complete(&mut self, report: AssessmentReport) -> Result<&AssessmentReport, DomainError> {
        self.expect(AssessmentPhase::Submitting, "complete")?;
        self.phase = AssessmentPhase::Displaying;
        Ok(&*self.report.insert(report))
    }

    /// Back to an empty questionnaire from any phase
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn expect(&self, phase: AssessmentPhase, action: &'static str) -> Result<(), DomainError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                action,
                phase: self.phase.as_str(),
            })
        }
    }
}
