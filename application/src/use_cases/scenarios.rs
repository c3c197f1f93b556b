//! Reference scenarios
//!
//! Two canned questionnaires used to demonstrate the service end to end:
//! a diabetic patient and a weight-management patient.

use advisor_domain::{Condition, Demographics, Gender, PatientProfile};

/// A named, pre-filled questionnaire
#[derive(Debug, Clone)]
pub struct Scenario {
    pub title: &'static str,
    pub profile: PatientProfile,
}

/// The reference scenarios, in presentation order
pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            title: "Patient considering GLP-1 for diabetes",
            profile: PatientProfile::new(Demographics {
                age: 45,
                gender: Gender::Male,
                ..Demographics::default()
            })
            .with_condition(Condition::Diabetes)
            .with_condition(Condition::HighBloodSugar),
        },
        Scenario {
            title: "Patient considering GLP-1 for weight management",
            profile: PatientProfile::new(Demographics {
                age: 38,
                gender: Gender::Female,
                ..Demographics::default()
            })
            .with_condition(Condition::Obesity)
            .with_condition(Condition::WeightGain),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_domain::{SuitabilityLevel, assess};

    #[test]
    fn test_scenarios_are_valid() {
        for scenario in reference_scenarios() {
            assert!(scenario.profile.validate().is_ok(), "{}", scenario.title);
        }
    }

    #[test]
    fn test_scenario_verdicts() {
        let levels: Vec<_> = reference_scenarios()
            .iter()
            .map(|s| assess(&s.profile).level)
            .collect();
        // obesity flag at the default BMI of 25 is not the high path
        assert_eq!(
            levels,
            vec![SuitabilityLevel::High, SuitabilityLevel::Moderate]
        );
    }
}
