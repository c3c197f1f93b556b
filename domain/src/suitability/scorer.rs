//! GLP-1 suitability scorer
//!
//! A fixed decision table over the patient's condition flags and BMI.
//! The result does not depend on the remote analysis.

use super::verdict::{RiskFactor, SuitabilityLevel, SuitabilityVerdict};
use crate::patient::profile::PatientProfile;

/// BMI at or above which the obesity risk factor applies
pub const OBESITY_BMI_THRESHOLD: f64 = 30.0;

/// Collect triggered risk factors in their fixed evaluation order.
pub fn risk_factors(profile: &PatientProfile) -> Vec<RiskFactor> {
    let conditions = &profile.conditions;
    let bmi_obese = profile.demographics.bmi >= OBESITY_BMI_THRESHOLD;

    let checks = [
        (conditions.diabetes, RiskFactor::Diabetes),
        (conditions.obesity || bmi_obese, RiskFactor::Obesity),
        (conditions.prediabetes, RiskFactor::Prediabetes),
        (
            conditions.cardiovascular_disease,
            RiskFactor::CardiovascularDisease,
        ),
        (conditions.high_blood_sugar, RiskFactor::HighBloodSugar),
        (conditions.weight_gain, RiskFactor::WeightGain),
    ];

    checks
        .into_iter()
        .filter_map(|(triggered, factor)| triggered.then_some(factor))
        .collect()
}

/// Assess GLP-1 suitability for a profile.
pub fn assess(profile: &PatientProfile) -> SuitabilityVerdict {
    let factors = risk_factors(profile);
    let conditions = &profile.conditions;
    let bmi_obese = profile.demographics.bmi >= OBESITY_BMI_THRESHOLD;

    let level = if conditions.diabetes || (conditions.obesity && bmi_obese) {
        SuitabilityLevel::High
    } else if factors.len() >= 2 {
        SuitabilityLevel::Moderate
    } else if factors.len() == 1 {
        SuitabilityLevel::Low
    } else {
        SuitabilityLevel::NotIndicated
    };

    SuitabilityVerdict::new(level, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::profile::{Condition, Demographics, Gender, Symptom};

    fn profile_with_bmi(bmi: f64) -> PatientProfile {
        PatientProfile::new(Demographics {
            bmi,
            ..Demographics::default()
        })
    }

    #[test]
    fn test_diabetes_male_45_is_high() {
        let profile = PatientProfile::new(Demographics {
            age: 45,
            gender: Gender::Male,
            ..Demographics::default()
        })
        .with_condition(Condition::Diabetes);

        let verdict = assess(&profile);
        assert_eq!(verdict.level, SuitabilityLevel::High);
        assert_eq!(verdict.descriptions(), vec!["Type 2 Diabetes diagnosis"]);
    }

    #[test]
    fn test_healthy_bmi_22_not_indicated() {
        let verdict = assess(&profile_with_bmi(22.0));
        assert_eq!(verdict.level, SuitabilityLevel::NotIndicated);
        assert!(verdict.risk_factors.is_empty());
    }

    #[test]
    fn test_diabetes_is_high_regardless_of_other_fields() {
        for bmi in [10.0, 22.0, 29.9, 30.0, 55.0] {
            let mut profile = profile_with_bmi(bmi).with_condition(Condition::Diabetes);
            assert_eq!(assess(&profile).level, SuitabilityLevel::High);

            for condition in Condition::ALL {
                profile = profile.with_condition(condition);
                assert_eq!(assess(&profile).level, SuitabilityLevel::High);
            }
        }
    }

    #[test]
    fn test_obesity_flag_with_bmi_30_is_high() {
        let profile = profile_with_bmi(30.0).with_condition(Condition::Obesity);
        let verdict = assess(&profile);
        assert_eq!(verdict.level, SuitabilityLevel::High);
        assert_eq!(verdict.risk_factors, vec![RiskFactor::Obesity]);
    }

    #[test]
    fn test_obesity_flag_below_threshold_is_low() {
        let profile = profile_with_bmi(29.9).with_condition(Condition::Obesity);
        let verdict = assess(&profile);
        assert_eq!(verdict.level, SuitabilityLevel::Low);
        assert_eq!(verdict.risk_factors, vec![RiskFactor::Obesity]);
    }

    #[test]
    fn test_bmi_alone_counts_once() {
        let verdict = assess(&profile_with_bmi(34.0));
        assert_eq!(verdict.level, SuitabilityLevel::Low);
        assert_eq!(verdict.risk_factors, vec![RiskFactor::Obesity]);
    }

    #[test]
    fn test_any_two_factors_without_high_path_is_moderate() {
        let candidates: [fn(PatientProfile) -> PatientProfile; 5] = [
            |p| p.with_condition(Condition::Prediabetes),
            |p| p.with_condition(Condition::CardiovascularDisease),
            |p| p.with_condition(Condition::HighBloodSugar),
            |p| p.with_condition(Condition::WeightGain),
            |p| PatientProfile {
                demographics: Demographics {
                    bmi: 31.0,
                    ..p.demographics
                },
                ..p
            },
        ];

        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                let profile = candidates[j](candidates[i](profile_with_bmi(24.0)));
                let verdict = assess(&profile);
                assert_eq!(verdict.level, SuitabilityLevel::Moderate, "pair ({i}, {j})");
                assert_eq!(verdict.risk_factors.len(), 2);
            }
        }
    }

    #[test]
    fn test_factors_reported_in_fixed_order() {
        let profile = profile_with_bmi(24.0)
            .with_condition(Condition::WeightGain)
            .with_condition(Condition::HighBloodSugar)
            .with_condition(Condition::CardiovascularDisease)
            .with_condition(Condition::Prediabetes)
            .with_condition(Condition::Obesity)
            .with_condition(Condition::Diabetes);

        assert_eq!(
            assess(&profile).descriptions(),
            vec![
                "Type 2 Diabetes diagnosis",
                "Obesity (BMI ≥ 30)",
                "Prediabetes",
                "Cardiovascular disease",
                "Elevated blood sugar",
                "Significant weight gain",
            ]
        );
    }

    #[test]
    fn test_unscored_flags_do_not_trigger() {
        let profile = profile_with_bmi(24.0)
            .with_condition(Condition::Hypertension)
            .with_condition(Condition::HighCholesterol)
            .with_condition(Condition::FattyLiver)
            .with_symptom(Symptom::Fatigue)
            .with_symptom(Symptom::IncreasedThirst);

        assert_eq!(assess(&profile).level, SuitabilityLevel::NotIndicated);
    }
}
