//! Assessment report - everything shown to the patient after one run

use crate::diagnosis::analysis::AnalysisReport;
use crate::patient::profile::PatientProfile;
use crate::suitability::verdict::SuitabilityVerdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which diagnostic backend produced the remote analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// The live diagnostic web service
    Live,
    /// Locally synthesized demo results
    Demo,
}

impl AnalysisSource {
    pub fn is_demo(&self) -> bool {
        matches!(self, AnalysisSource::Demo)
    }
}

/// Outcome of the remote half of an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoteAnalysis {
    Completed(AnalysisReport),
    Failed { error: String },
}

impl RemoteAnalysis {
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            RemoteAnalysis::Completed(report) => Some(report),
            RemoteAnalysis::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RemoteAnalysis::Completed(_) => None,
            RemoteAnalysis::Failed { error } => Some(error),
        }
    }
}

/// Remote analysis and local verdict side by side (Entity)
///
/// The two halves are computed independently and are not reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub profile: PatientProfile,
    pub source: AnalysisSource,
    /// Conditions and symptoms submitted (demographics excluded)
    pub features_analyzed: usize,
    pub remote: RemoteAnalysis,
    pub verdict: SuitabilityVerdict,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentReport {
    pub fn new(
        profile: PatientProfile,
        source: AnalysisSource,
        features_analyzed: usize,
        remote: RemoteAnalysis,
        verdict: SuitabilityVerdict,
    ) -> Self {
        Self {
            profile,
            source,
            features_analyzed,
            remote,
            verdict,
            completed_at: Utc::now(),
        }
    }
}
