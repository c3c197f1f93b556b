//! Remote analysis value objects
//!
//! The diagnostic service answers `Analyze` with a JSON document. Two shapes
//! are understood:
//!
//! - `Conditions`: `[{"Name", "Probability", "Icd", "ProfName", "Ranking"}, ...]`
//! - `Diseases`: `[{"<name>": "<probability>"}, ...]`, ranked by position
//!
//! The raw payload is always kept alongside the parsed candidates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One candidate condition proposed by the diagnostic service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCondition {
    pub name: String,
    /// Probability in `0.0..=1.0`
    pub probability: f64,
    /// ICD classification code, when the service provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icd: Option<String>,
    /// Professional (clinical) name, when it differs from `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_name: Option<String>,
    /// 1-based rank
    pub ranking: u32,
}

impl CandidateCondition {
    pub fn new(name: impl Into<String>, probability: f64, ranking: u32) -> Self {
        Self {
            name: name.into(),
            probability,
            icd: None,
            professional_name: None,
            ranking,
        }
    }

    pub fn with_icd(mut self, icd: impl Into<String>) -> Self {
        self.icd = Some(icd.into());
        self
    }

    pub fn with_professional_name(mut self, name: impl Into<String>) -> Self {
        self.professional_name = Some(name.into());
        self
    }

    /// Probability as a whole-number percentage
    pub fn percent(&self) -> f64 {
        (self.probability * 100.0).round()
    }
}

/// Parsed result of a remote `Analyze` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Candidates ordered by rank
    pub conditions: Vec<CandidateCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload exactly as returned by the service
    pub raw: Value,
}

impl AnalysisReport {
    /// Parse a payload, keeping the raw document.
    ///
    /// Unrecognised or partial entries are skipped rather than rejected.
    pub fn from_payload(raw: Value) -> Self {
        let mut conditions = match raw.get("Conditions").and_then(Value::as_array) {
            Some(entries) => parse_conditions(entries),
            None => raw
                .get("Diseases")
                .and_then(Value::as_array)
                .map(|entries| parse_diseases(entries))
                .unwrap_or_default(),
        };
        conditions.sort_by_key(|c| c.ranking);

        Self {
            conditions,
            triage_level: string_field(&raw, "TriageLevel"),
            message: string_field(&raw, "Message"),
            raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Highest ranked candidate
    pub fn top(&self) -> Option<&CandidateCondition> {
        self.conditions.first()
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Accept numbers and numeric strings, the service uses both.
fn probability(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_conditions(entries: &[Value]) -> Vec<CandidateCondition> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let name = string_field(entry, "Name")?;
            let p = entry.get("Probability").and_then(probability).unwrap_or(0.0);
            let ranking = entry
                .get("Ranking")
                .and_then(Value::as_u64)
                .map(|r| r as u32)
                .unwrap_or(i as u32 + 1);

            let mut condition = CandidateCondition::new(name, p, ranking);
            condition.icd = string_field(entry, "Icd");
            condition.professional_name = string_field(entry, "ProfName");
            Some(condition)
        })
        .collect()
}

fn parse_diseases(entries: &[Value]) -> Vec<CandidateCondition> {
    entries
        .iter()
        .filter_map(|entry| entry.as_object()?.iter().next())
        .enumerate()
        .map(|(i, (name, p))| {
            CandidateCondition::new(name.clone(), probability(p).unwrap_or(0.0), i as u32 + 1)
        })
        .collect()
}
