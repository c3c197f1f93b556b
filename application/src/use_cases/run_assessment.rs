//! Run Assessment use case
//!
//! Pushes a questionnaire to the diagnostic service, fetches its analysis,
//! scores GLP-1 suitability locally, and returns both side by side.

use crate::ports::diagnosis_api::{ApiError, DiagnosisApi};
use crate::ports::exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger};
use crate::ports::progress::{AssessmentProgress, AssessmentStep, NoProgress};
use advisor_domain::{
    AnalysisReport, AnalysisSource, AssessmentReport, AssessmentState, DomainError, Feature,
    PatientProfile, RemoteAnalysis, SessionId, assess,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop an assessment before any result exists
///
/// Remote failures are not in here: they end up in the report.
#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Use case for running one questionnaire assessment at a time
pub struct RunAssessmentUseCase {
    primary: Box<dyn DiagnosisApi>,
    fallback: Option<Box<dyn DiagnosisApi>>,
    logger: Arc<dyn ExchangeLogger>,
    /// Set once the fallback took over; later runs go straight to it
    fallback_engaged: bool,
}

impl RunAssessmentUseCase {
    pub fn new(primary: Box<dyn DiagnosisApi>) -> Self {
        Self {
            primary,
            fallback: None,
            logger: Arc::new(NoExchangeLogger),
            fallback_engaged: false,
        }
    }

    /// Substitute `fallback` whenever the primary service fails
    pub fn with_fallback(mut self, fallback: Box<dyn DiagnosisApi>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Whether results now come from the fallback
    pub fn fallback_engaged(&self) -> bool {
        self.fallback_engaged
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &mut self,
        profile: PatientProfile,
    ) -> Result<AssessmentReport, AssessmentError> {
        self.execute_with_progress(profile, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &mut self,
        profile: PatientProfile,
        progress: &dyn AssessmentProgress,
    ) -> Result<AssessmentReport, AssessmentError> {
        let mut state = AssessmentState::new();
        state.begin_submission(profile.clone())?;
        debug!("Assessment state: {}", state.phase());

        let (source, remote) = self.analyze_remotely(&profile, progress).await;
        let verdict = assess(&profile);
        info!(
            "Local suitability: {} ({} risk factors)",
            verdict.level,
            verdict.risk_factors.len()
        );

        let report = AssessmentReport::new(
            profile.clone(),
            source,
            profile.flagged_count(),
            remote,
            verdict,
        );
        progress.on_finished();

        let report = state.complete(report)?.clone();
        debug!("Assessment state: {}", state.phase());
        Ok(report)
    }

    async fn analyze_remotely(
        &mut self,
        profile: &PatientProfile,
        progress: &dyn AssessmentProgress,
    ) -> (AnalysisSource, RemoteAnalysis) {
        let logger = self.logger.as_ref();

        if !self.fallback_engaged {
            let primary = self.primary.as_mut();
            match submit_and_analyze(primary, profile, progress, logger).await {
                Ok(report) => return (primary.source(), RemoteAnalysis::Completed(report)),
                Err(e) => {
                    let message = primary.last_error();
                    logger.log(ExchangeEvent::new(
                        "api_failure",
                        json!({ "source": primary.source(), "error": message }),
                    ));

                    if self.fallback.is_none() {
                        warn!("Remote analysis failed: {}", e);
                        return (primary.source(), RemoteAnalysis::Failed { error: message });
                    }

                    warn!("Remote analysis failed ({}), switching to demo mode", e);
                    progress.on_fallback(&message);
                    logger.log(ExchangeEvent::new(
                        "fallback_engaged",
                        json!({ "reason": message }),
                    ));
                    self.fallback_engaged = true;
                }
            }
        }

        match self.fallback.as_mut() {
            Some(fallback) => {
                let fallback = fallback.as_mut();
                match submit_and_analyze(fallback, profile, progress, logger).await {
                    Ok(report) => (fallback.source(), RemoteAnalysis::Completed(report)),
                    Err(e) => {
                        warn!("Fallback analysis failed: {}", e);
                        (
                            fallback.source(),
                            RemoteAnalysis::Failed {
                                error: fallback.last_error(),
                            },
                        )
                    }
                }
            }
            None => (
                self.primary.source(),
                RemoteAnalysis::Failed {
                    error: self.primary.last_error(),
                },
            ),
        }
    }
}

/// One full session against one backend: session, terms, features, analysis.
async fn submit_and_analyze(
    api: &mut dyn DiagnosisApi,
    profile: &PatientProfile,
    progress: &dyn AssessmentProgress,
    logger: &dyn ExchangeLogger,
) -> Result<AnalysisReport, ApiError> {
    progress.on_step(AssessmentStep::Initializing);
    let session = api.create_session().await?;
    info!("Diagnosis session created ({:?})", api.source());
    logger.log(ExchangeEvent::new(
        "session_created",
        json!({ "source": api.source(), "session_id": session.as_str() }),
    ));

    progress.on_step(AssessmentStep::AcceptingTerms);
    api.accept_terms(&session).await?;
    logger.log(ExchangeEvent::new(
        "terms_accepted",
        json!({ "session_id": session.as_str() }),
    ));

    progress.on_step(AssessmentStep::AddingDemographics);
    submit_features(api, &session, &profile.demographic_features(), logger).await?;

    progress.on_step(AssessmentStep::AddingConditions);
    submit_features(api, &session, &profile.condition_features(), logger).await?;

    progress.on_step(AssessmentStep::AddingSymptoms);
    submit_features(api, &session, &profile.symptom_features(), logger).await?;

    progress.on_step(AssessmentStep::Analyzing);
    let report = api.analyze(&session).await?;
    info!(
        "Analysis complete: {} candidate conditions",
        report.conditions.len()
    );
    logger.log(ExchangeEvent::new(
        "analysis_completed",
        json!({
            "session_id": session.as_str(),
            "candidates": report.conditions.len(),
            "payload": report.raw,
        }),
    ));

    progress.on_step(AssessmentStep::Complete);
    Ok(report)
}

async fn submit_features(
    api: &mut dyn DiagnosisApi,
    session: &SessionId,
    features: &[Feature],
    logger: &dyn ExchangeLogger,
) -> Result<(), ApiError> {
    for feature in features {
        api.add_feature(session, &feature.name, &feature.value)
            .await?;
        debug!("Added feature: {}", feature);
        logger.log(ExchangeEvent::new(
            "feature_added",
            json!({ "name": feature.name, "value": feature.value }),
        ));
    }
    Ok(())
}
