//! Exported result bundle
//!
//! The only artifact that leaves the process: a self-contained JSON
//! document the user asks for explicitly.

use super::report::{AnalysisSource, AssessmentReport};
use crate::patient::profile::PatientProfile;
use crate::suitability::verdict::SuitabilityVerdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Downloadable snapshot of one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub timestamp: DateTime<Utc>,
    pub patient_data: PatientProfile,
    /// Raw remote payload, `null` when the remote analysis failed
    pub api_results: Value,
    pub glp1_assessment: SuitabilityVerdict,
    pub source: AnalysisSource,
}

impl ResultBundle {
    pub fn from_report(report: &AssessmentReport) -> Self {
        Self {
            timestamp: report.completed_at,
            patient_data: report.profile.clone(),
            api_results: report
                .remote
                .report()
                .map(|r| r.raw.clone())
                .unwrap_or(Value::Null),
            glp1_assessment: report.verdict.clone(),
            source: report.source,
        }
    }

    /// Suggested file name, stamped with the bundle time
    pub fn file_name(&self) -> String {
        format!(
            "glp1_analysis_{}.json",
            self.timestamp.format("%Y%m%d_%H%M%S")
        )
    }
}
