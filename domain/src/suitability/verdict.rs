//! Suitability value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal suitability of GLP-1 therapy, from strongest to weakest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitabilityLevel {
    High,
    Moderate,
    Low,
    NotIndicated,
}

impl SuitabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityLevel::High => "high",
            SuitabilityLevel::Moderate => "moderate",
            SuitabilityLevel::Low => "low",
            SuitabilityLevel::NotIndicated => "not_indicated",
        }
    }

    /// Short title shown in front of the message
    pub fn title(&self) -> &'static str {
        match self {
            SuitabilityLevel::High => "High Suitability",
            SuitabilityLevel::Moderate => "Moderate Suitability",
            SuitabilityLevel::Low => "Low Suitability",
            SuitabilityLevel::NotIndicated => "Not Indicated",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SuitabilityLevel::High => "Strong indication for GLP-1 therapy",
            SuitabilityLevel::Moderate => "May benefit from evaluation",
            SuitabilityLevel::Low => "May not be indicated",
            SuitabilityLevel::NotIndicated => "Typically not recommended",
        }
    }

    /// Title and message joined for display
    pub fn headline(&self) -> String {
        format!("{} - {}", self.title(), self.message())
    }
}

impl fmt::Display for SuitabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risk factor the scorer can trigger, serialized as its description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFactor {
    #[serde(rename = "Type 2 Diabetes diagnosis")]
    Diabetes,
    #[serde(rename = "Obesity (BMI ≥ 30)")]
    Obesity,
    #[serde(rename = "Prediabetes")]
    Prediabetes,
    #[serde(rename = "Cardiovascular disease")]
    CardiovascularDisease,
    #[serde(rename = "Elevated blood sugar")]
    HighBloodSugar,
    #[serde(rename = "Significant weight gain")]
    WeightGain,
}

impl RiskFactor {
    pub fn description(&self) -> &'static str {
        match self {
            RiskFactor::Diabetes => "Type 2 Diabetes diagnosis",
            RiskFactor::Obesity => "Obesity (BMI ≥ 30)",
            RiskFactor::Prediabetes => "Prediabetes",
            RiskFactor::CardiovascularDisease => "Cardiovascular disease",
            RiskFactor::HighBloodSugar => "Elevated blood sugar",
            RiskFactor::WeightGain => "Significant weight gain",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of the local suitability heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    pub level: SuitabilityLevel,
    /// Triggered risk factors in evaluation order
    pub risk_factors: Vec<RiskFactor>,
}

impl SuitabilityVerdict {
    pub fn new(level: SuitabilityLevel, risk_factors: Vec<RiskFactor>) -> Self {
        Self {
            level,
            risk_factors,
        }
    }

    /// Risk factor descriptions in evaluation order
    pub fn descriptions(&self) -> Vec<&'static str> {
        self.risk_factors.iter().map(|r| r.description()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serializes_snake_case() {
        let json = serde_json::to_string(&SuitabilityLevel::NotIndicated).unwrap();
        assert_eq!(json, "\"not_indicated\"");
    }

    #[test]
    fn test_risk_factor_serializes_as_description() {
        let json = serde_json::to_string(&RiskFactor::Obesity).unwrap();
        assert_eq!(json, "\"Obesity (BMI ≥ 30)\"");
        let back: RiskFactor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RiskFactor::Obesity);
    }

    #[test]
    fn test_headline() {
        assert_eq!(
            SuitabilityLevel::Moderate.headline(),
            "Moderate Suitability - May benefit from evaluation"
        );
    }
}
