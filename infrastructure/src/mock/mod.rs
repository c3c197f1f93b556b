//! Offline stand-in for the diagnosis service
//!
//! [`MockDiagnosisApi`] honours the same session contract as the live client
//! and derives a fixed set of candidate conditions from the submitted flags.

use advisor_application::{ApiError, DiagnosisApi, SessionGuard};
use advisor_domain::{AnalysisReport, AnalysisSource, FLAG_VALUE, Feature, SessionId};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::debug;

/// Last-error message reported while the mock is in use
pub const MOCK_LAST_ERROR: &str = "Using mock mode - API connection unavailable";

pub const MOCK_MESSAGE: &str = "Mock analysis generated - EndlessMedical API unavailable";

/// Candidate emitted when a given flag was submitted
struct CannedCondition {
    feature: &'static str,
    name: &'static str,
    professional_name: &'static str,
    probability: f64,
    icd: &'static str,
    ranking: u32,
}

const CANNED: [CannedCondition; 3] = [
    CannedCondition {
        feature: "Diabetes",
        name: "Type 2 Diabetes Mellitus",
        professional_name: "Type 2 Diabetes Mellitus",
        probability: 0.85,
        icd: "E11",
        ranking: 1,
    },
    CannedCondition {
        feature: "Obesity",
        name: "Obesity",
        professional_name: "Obesity",
        probability: 0.78,
        icd: "E66",
        ranking: 2,
    },
    CannedCondition {
        feature: "HighBloodSugar",
        name: "Hyperglycemia",
        professional_name: "Hyperglycemia",
        probability: 0.72,
        icd: "R73.9",
        ranking: 3,
    },
];

const GENERAL: CannedCondition = CannedCondition {
    feature: "",
    name: "General Health Assessment",
    professional_name: "General medical examination",
    probability: 0.60,
    icd: "Z00.00",
    ranking: 1,
};

impl CannedCondition {
    fn to_json(&self) -> Value {
        json!({
            "Name": self.name,
            "Probability": self.probability,
            "Icd": self.icd,
            "ProfName": self.professional_name,
            "Ranking": self.ranking,
        })
    }
}

#[derive(Debug)]
pub struct MockDiagnosisApi {
    guard: SessionGuard,
    sessions_opened: u32,
}

impl Default for MockDiagnosisApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDiagnosisApi {
    pub fn new() -> Self {
        let mut guard = SessionGuard::new();
        guard.set_last_error(MOCK_LAST_ERROR);
        Self {
            guard,
            sessions_opened: 0,
        }
    }

    /// `mock_` followed by a five digit number
    fn next_session_id(&mut self) -> Result<SessionId, ApiError> {
        self.sessions_opened = self.sessions_opened.wrapping_add(1);
        let seed = Utc::now().timestamp_subsec_nanos() ^ self.sessions_opened.wrapping_mul(7919);
        let number = 10_000 + seed % 90_000;
        SessionId::new(format!("mock_{}", number)).map_err(|_| ApiError::MissingSessionId)
    }

    fn flagged(&self, name: &str) -> bool {
        self.guard
            .features()
            .iter()
            .any(|f| f.name == name && f.value == FLAG_VALUE)
    }

    /// Deterministic payload for the features submitted so far
    fn payload(&self, session: &SessionId) -> Value {
        let mut conditions: Vec<Value> = CANNED
            .iter()
            .filter(|c| self.flagged(c.feature))
            .map(CannedCondition::to_json)
            .collect();
        if conditions.is_empty() {
            conditions.push(GENERAL.to_json());
        }

        let triage = if self.flagged("Diabetes") || self.flagged("Obesity") {
            "MEDIUM"
        } else {
            "LOW"
        };

        json!({
            "Status": "SUCCESS",
            "SessionID": session.as_str(),
            "Conditions": conditions,
            "TriageLevel": triage,
            "Message": MOCK_MESSAGE,
        })
    }
}

#[async_trait]
impl DiagnosisApi for MockDiagnosisApi {
    fn source(&self) -> AnalysisSource {
        AnalysisSource::Demo
    }

    async fn create_session(&mut self) -> Result<SessionId, ApiError> {
        let session = self.next_session_id()?;
        debug!("Opened mock session {}", session);
        self.guard.open(session.clone());
        Ok(session)
    }

    async fn accept_terms(&mut self, session: &SessionId) -> Result<(), ApiError> {
        if let Err(e) = self.guard.require_session(session) {
            return self.guard.fail("accept_terms", e);
        }
        self.guard.accept_terms();
        Ok(())
    }

    async fn add_feature(
        &mut self,
        session: &SessionId,
        name: &str,
        value: &str,
    ) -> Result<(), ApiError> {
        if let Err(e) = self.guard.require_terms(session) {
            return self.guard.fail("add_feature", e);
        }
        self.guard.record_feature(Feature::new(name, value));
        Ok(())
    }

    async fn analyze(&mut self, session: &SessionId) -> Result<AnalysisReport, ApiError> {
        if let Err(e) = self.guard.require_terms(session) {
            return self.guard.fail("analyze", e);
        }
        Ok(AnalysisReport::from_payload(self.payload(session)))
    }

    async fn check_connection(&mut self) -> Result<(), ApiError> {
        Ok(())
    }

    fn last_error(&self) -> String {
        self.guard.last_error()
    }
}
