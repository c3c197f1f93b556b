//! Progress notification port
//!
//! Defines the interface for reporting progress during an assessment run.

/// Steps of one assessment run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssessmentStep {
    Initializing,
    AcceptingTerms,
    AddingDemographics,
    AddingConditions,
    AddingSymptoms,
    Analyzing,
    Complete,
}

impl AssessmentStep {
    /// Share of the run finished when this step starts
    pub fn percent(&self) -> u8 {
        match self {
            AssessmentStep::Initializing => 0,
            AssessmentStep::AcceptingTerms => 20,
            AssessmentStep::AddingDemographics => 40,
            AssessmentStep::AddingConditions => 50,
            AssessmentStep::AddingSymptoms => 70,
            AssessmentStep::Analyzing => 90,
            AssessmentStep::Complete => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssessmentStep::Initializing => "Initializing...",
            AssessmentStep::AcceptingTerms => "Accepting terms...",
            AssessmentStep::AddingDemographics => "Adding demographics...",
            AssessmentStep::AddingConditions => "Adding conditions...",
            AssessmentStep::AddingSymptoms => "Adding symptoms...",
            AssessmentStep::Analyzing => "Analyzing...",
            AssessmentStep::Complete => "Complete!",
        }
    }
}

/// Callback for progress updates during an assessment
///
/// Implementations live in the presentation layer.
pub trait AssessmentProgress: Send + Sync {
    /// Called when a step starts
    fn on_step(&self, step: AssessmentStep);

    /// Called when the live service failed and demo results are used instead
    fn on_fallback(&self, _reason: &str) {}

    /// Called once the run is over, successful or not
    fn on_finished(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AssessmentProgress for NoProgress {
    fn on_step(&self, _step: AssessmentStep) {}
}
