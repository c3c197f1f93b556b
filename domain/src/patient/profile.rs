//! Patient profile entity
//!
//! The fixed questionnaire record: demographics plus two closed sets of
//! boolean flags (conditions and symptoms). Deserialization rejects any
//! key outside these sets.

use super::feature::Feature;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Accepted age range in years
pub const AGE_RANGE: RangeInclusive<u32> = 18..=120;

/// Accepted body-mass-index range
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=70.0;

/// Accepted body weight range in kilograms
pub const WEIGHT_RANGE: RangeInclusive<f64> = 30.0..=300.0;

/// Patient gender as understood by the diagnostic service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(DomainError::InvalidProfile(format!(
                "unknown gender '{}'",
                other
            ))),
        }
    }
}

/// Demographic answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Demographics {
    pub age: u32,
    pub gender: Gender,
    pub bmi: f64,
    /// Body weight in kilograms
    pub weight: f64,
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            age: 45,
            gender: Gender::Male,
            bmi: 25.0,
            weight: 70.0,
        }
    }
}

/// Diagnosed conditions the questionnaire asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Diabetes,
    Prediabetes,
    Obesity,
    HighBloodSugar,
    WeightGain,
    CardiovascularDisease,
    Hypertension,
    HighCholesterol,
    FattyLiver,
}

impl Condition {
    /// All conditions in questionnaire order
    pub const ALL: [Condition; 9] = [
        Condition::Diabetes,
        Condition::Prediabetes,
        Condition::Obesity,
        Condition::HighBloodSugar,
        Condition::WeightGain,
        Condition::CardiovascularDisease,
        Condition::Hypertension,
        Condition::HighCholesterol,
        Condition::FattyLiver,
    ];

    /// Feature name submitted to the diagnostic service
    pub fn feature_name(&self) -> &'static str {
        match self {
            Condition::Diabetes => "Diabetes",
            Condition::Prediabetes => "Prediabetes",
            Condition::Obesity => "Obesity",
            Condition::HighBloodSugar => "HighBloodSugar",
            Condition::WeightGain => "WeightGain",
            Condition::CardiovascularDisease => "CardiovascularDisease",
            Condition::Hypertension => "Hypertension",
            Condition::HighCholesterol => "HighCholesterol",
            Condition::FattyLiver => "FattyLiver",
        }
    }

    /// Questionnaire label
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Diabetes => "Type 2 Diabetes",
            Condition::Prediabetes => "Prediabetes",
            Condition::Obesity => "Obesity",
            Condition::HighBloodSugar => "High Blood Sugar",
            Condition::WeightGain => "Recent Weight Gain",
            Condition::CardiovascularDisease => "Cardiovascular Disease",
            Condition::Hypertension => "Hypertension",
            Condition::HighCholesterol => "High Cholesterol",
            Condition::FattyLiver => "Fatty Liver",
        }
    }
}

impl FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.feature_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownFeature(s.to_string()))
    }
}

/// Current symptoms the questionnaire asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symptom {
    Fatigue,
    IncreasedThirst,
    FrequentUrination,
    BlurredVision,
    SlowHealing,
    IncreasedHunger,
    Numbness,
    Nausea,
    Headaches,
}

impl Symptom {
    /// All symptoms in questionnaire order
    pub const ALL: [Symptom; 9] = [
        Symptom::Fatigue,
        Symptom::IncreasedThirst,
        Symptom::FrequentUrination,
        Symptom::BlurredVision,
        Symptom::SlowHealing,
        Symptom::IncreasedHunger,
        Symptom::Numbness,
        Symptom::Nausea,
        Symptom::Headaches,
    ];

    /// Feature name submitted to the diagnostic service
    pub fn feature_name(&self) -> &'static str {
        match self {
            Symptom::Fatigue => "Fatigue",
            Symptom::IncreasedThirst => "IncreasedThirst",
            Symptom::FrequentUrination => "FrequentUrination",
            Symptom::BlurredVision => "BlurredVision",
            Symptom::SlowHealing => "SlowHealing",
            Symptom::IncreasedHunger => "IncreasedHunger",
            Symptom::Numbness => "Numbness",
            Symptom::Nausea => "Nausea",
            Symptom::Headaches => "Headaches",
        }
    }

    /// Questionnaire label
    pub fn label(&self) -> &'static str {
        match self {
            Symptom::Fatigue => "Fatigue",
            Symptom::IncreasedThirst => "Increased Thirst",
            Symptom::FrequentUrination => "Frequent Urination",
            Symptom::BlurredVision => "Blurred Vision",
            Symptom::SlowHealing => "Slow Healing",
            Symptom::IncreasedHunger => "Increased Hunger",
            Symptom::Numbness => "Numbness/Tingling",
            Symptom::Nausea => "Nausea",
            Symptom::Headaches => "Headaches",
        }
    }
}

impl FromStr for Symptom {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symptom::ALL
            .into_iter()
            .find(|sym| sym.feature_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownFeature(s.to_string()))
    }
}

/// Condition checkboxes, serialized by feature name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct ConditionFlags {
    pub diabetes: bool,
    pub prediabetes: bool,
    pub obesity: bool,
    pub high_blood_sugar: bool,
    pub weight_gain: bool,
    pub cardiovascular_disease: bool,
    pub hypertension: bool,
    pub high_cholesterol: bool,
    pub fatty_liver: bool,
}

impl ConditionFlags {
    fn slot(&mut self, condition: Condition) -> &mut bool {
        match condition {
            Condition::Diabetes => &mut self.diabetes,
            Condition::Prediabetes => &mut self.prediabetes,
            Condition::Obesity => &mut self.obesity,
            Condition::HighBloodSugar => &mut self.high_blood_sugar,
            Condition::WeightGain => &mut self.weight_gain,
            Condition::CardiovascularDisease => &mut self.cardiovascular_disease,
            Condition::Hypertension => &mut self.hypertension,
            Condition::HighCholesterol => &mut self.high_cholesterol,
            Condition::FattyLiver => &mut self.fatty_liver,
        }
    }

    pub fn has(&self, condition: Condition) -> bool {
        match condition {
            Condition::Diabetes => self.diabetes,
            Condition::Prediabetes => self.prediabetes,
            Condition::Obesity => self.obesity,
            Condition::HighBloodSugar => self.high_blood_sugar,
            Condition::WeightGain => self.weight_gain,
            Condition::CardiovascularDisease => self.cardiovascular_disease,
            Condition::Hypertension => self.hypertension,
            Condition::HighCholesterol => self.high_cholesterol,
            Condition::FattyLiver => self.fatty_liver,
        }
    }

    pub fn set(&mut self, condition: Condition, value: bool) {
        *self.slot(condition) = value;
    }

    /// Conditions that are checked, in questionnaire order
    pub fn active(&self) -> Vec<Condition> {
        Condition::ALL.into_iter().filter(|c| self.has(*c)).collect()
    }
}

/// Symptom checkboxes, serialized by feature name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct SymptomFlags {
    pub fatigue: bool,
    pub increased_thirst: bool,
    pub frequent_urination: bool,
    pub blurred_vision: bool,
    pub slow_healing: bool,
    pub increased_hunger: bool,
    pub numbness: bool,
    pub nausea: bool,
    pub headaches: bool,
}

impl SymptomFlags {
    fn slot(&mut self, symptom: Symptom) -> &mut bool {
        match symptom {
            Symptom::Fatigue => &mut self.fatigue,
            Symptom::IncreasedThirst => &mut self.increased_thirst,
            Symptom::FrequentUrination => &mut self.frequent_urination,
            Symptom::BlurredVision => &mut self.blurred_vision,
            Symptom::SlowHealing => &mut self.slow_healing,
            Symptom::IncreasedHunger => &mut self.increased_hunger,
            Symptom::Numbness => &mut self.numbness,
            Symptom::Nausea => &mut self.nausea,
            Symptom::Headaches => &mut self.headaches,
        }
    }

    pub fn has(&self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::Fatigue => self.fatigue,
            Symptom::IncreasedThirst => self.increased_thirst,
            Symptom::FrequentUrination => self.frequent_urination,
            Symptom::BlurredVision => self.blurred_vision,
            Symptom::SlowHealing => self.slow_healing,
            Symptom::IncreasedHunger => self.increased_hunger,
            Symptom::Numbness => self.numbness,
            Symptom::Nausea => self.nausea,
            Symptom::Headaches => self.headaches,
        }
    }

    pub fn set(&mut self, symptom: Symptom, value: bool) {
        *self.slot(symptom) = value;
    }

    /// Symptoms that are checked, in questionnaire order
    pub fn active(&self) -> Vec<Symptom> {
        Symptom::ALL.into_iter().filter(|s| self.has(*s)).collect()
    }
}

/// A completed questionnaire (Entity)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientProfile {
    pub demographics: Demographics,
    #[serde(default)]
    pub conditions: ConditionFlags,
    #[serde(default)]
    pub symptoms: SymptomFlags,
}

impl PatientProfile {
    /// Create a profile with the given demographics and no flags set
    pub fn new(demographics: Demographics) -> Self {
        Self {
            demographics,
            conditions: ConditionFlags::default(),
            symptoms: SymptomFlags::default(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.set(condition, true);
        self
    }

    pub fn with_symptom(mut self, symptom: Symptom) -> Self {
        self.symptoms.set(symptom, true);
        self
    }

    /// Check the answers against the questionnaire bounds.
    pub fn validate(&self) -> Result<(), DomainError> {
        let d = &self.demographics;
        if !AGE_RANGE.contains(&d.age) {
            return Err(DomainError::InvalidProfile(format!(
                "age {} is outside {}..={}",
                d.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            )));
        }
        if !d.bmi.is_finite() || !BMI_RANGE.contains(&d.bmi) {
            return Err(DomainError::InvalidProfile(format!(
                "BMI {} is outside {}..={}",
                d.bmi,
                BMI_RANGE.start(),
                BMI_RANGE.end()
            )));
        }
        if !d.weight.is_finite() || !WEIGHT_RANGE.contains(&d.weight) {
            return Err(DomainError::InvalidProfile(format!(
                "weight {} kg is outside {}..={}",
                d.weight,
                WEIGHT_RANGE.start(),
                WEIGHT_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Number of checked conditions and symptoms
    pub fn flagged_count(&self) -> usize {
        self.conditions.active().len() + self.symptoms.active().len()
    }

    /// Demographic features, submitted before any flag
    pub fn demographic_features(&self) -> Vec<Feature> {
        vec![
            Feature::new("Age", self.demographics.age.to_string()),
            Feature::new("Gender", self.demographics.gender.as_str()),
        ]
    }

    /// One `yes` feature per checked condition
    pub fn condition_features(&self) -> Vec<Feature> {
        self.conditions
            .active()
            .into_iter()
            .map(|c| Feature::flag(c.feature_name()))
            .collect()
    }

    /// One `yes` feature per checked symptom
    pub fn symptom_features(&self) -> Vec<Feature> {
        self.symptoms
            .active()
            .into_iter()
            .map(|s| Feature::flag(s.feature_name()))
            .collect()
    }

    /// Every feature to submit, in submission order
    pub fn features(&self) -> Vec<Feature> {
        let mut features = self.demographic_features();
        features.extend(self.condition_features());
        features.extend(self.symptom_features());
        features
    }
}
