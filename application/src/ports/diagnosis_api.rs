//! Diagnosis API port
//!
//! Defines the capability interface for the remote diagnostic service.
//! The live HTTP client and the local demo generator both implement it;
//! which one a run uses is decided when the use case is built.

use advisor_domain::{AnalysisReport, AnalysisSource, Feature, SessionId};
use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Reported by [`DiagnosisApi::last_error`] when nothing has failed yet
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors that can occur during diagnosis API operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed")]
    Connection,

    #[error("Error: {0}")]
    Transport(String),

    #[error("Status code {0}")]
    Status(u16),

    #[error("Invalid JSON response")]
    InvalidJson,

    #[error("Response did not contain a SessionID")]
    MissingSessionId,

    #[error("No active session")]
    NoActiveSession,

    #[error("Terms of use have not been accepted")]
    TermsNotAccepted,
}

impl ApiError {
    /// Whether another attempt may succeed without changing the request
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Timeout | ApiError::Connection)
    }
}

/// Remote diagnostic service (create / accept / add / analyze / last error)
///
/// Implementations never panic on remote trouble: every failure comes back
/// as an [`ApiError`] and is also kept for [`last_error`](Self::last_error).
#[async_trait]
pub trait DiagnosisApi: Send {
    /// Which backend this is
    fn source(&self) -> AnalysisSource;

    /// Open a fresh session, discarding any previous one
    async fn create_session(&mut self) -> Result<SessionId, ApiError>;

    /// Accept the service terms of use; required before any feature
    async fn accept_terms(&mut self, session: &SessionId) -> Result<(), ApiError>;

    /// Push one feature to the session
    async fn add_feature(
        &mut self,
        session: &SessionId,
        name: &str,
        value: &str,
    ) -> Result<(), ApiError>;

    /// Request the ranked candidate conditions for the session
    async fn analyze(&mut self, session: &SessionId) -> Result<AnalysisReport, ApiError>;

    /// Cheap reachability check that does not open a tracked session;
    /// a failure is recorded as the last error
    async fn check_connection(&mut self) -> Result<(), ApiError>;

    /// Message of the most recent failure, or [`UNKNOWN_ERROR`]
    fn last_error(&self) -> String;
}

/// Client-side bookkeeping shared by every [`DiagnosisApi`] implementation
///
/// Tracks the active session, whether terms were accepted, a mirror of the
/// submitted features, and the last error message.
#[derive(Debug, Default)]
pub struct SessionGuard {
    active: Option<SessionId>,
    terms_accepted: bool,
    features: Vec<Feature>,
    last_error: Option<String>,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new session; terms and features start over
    pub fn open(&mut self, session: SessionId) {
        self.active = Some(session);
        self.terms_accepted = false;
        self.features.clear();
    }

    /// Stop tracking the current session
    pub fn close(&mut self) {
        self.active = None;
        self.terms_accepted = false;
        self.features.clear();
    }

    pub fn active(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    /// `session` must be the one handed out by the last `open`
    pub fn require_session(&self, session: &SessionId) -> Result<(), ApiError> {
        match &self.active {
            Some(active) if active == session => Ok(()),
            _ => Err(ApiError::NoActiveSession),
        }
    }

    /// Active session with accepted terms
    pub fn require_terms(&self, session: &SessionId) -> Result<(), ApiError> {
        self.require_session(session)?;
        if self.terms_accepted {
            Ok(())
        } else {
            Err(ApiError::TermsNotAccepted)
        }
    }

    pub fn accept_terms(&mut self) {
        self.terms_accepted = true;
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Mirror a submitted feature; a repeated name replaces the old value
    pub fn record_feature(&mut self, feature: Feature) {
        match self.features.iter_mut().find(|f| f.name == feature.name) {
            Some(existing) => existing.value = feature.value,
            None => self.features.push(feature),
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Record `error` as the last error and return it
    pub fn fail<T>(&mut self, operation: &str, error: ApiError) -> Result<T, ApiError> {
        warn!("{} failed: {}", operation, error);
        self.last_error = Some(error.to_string());
        Err(error)
    }

    /// Overwrite the last error message without failing a call
    pub fn set_last_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn last_error(&self) -> String {
        self.last_error
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
    }
}
