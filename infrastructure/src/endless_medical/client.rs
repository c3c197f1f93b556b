//! EndlessMedical diagnosis client
//!
//! Implements [`DiagnosisApi`] over four endpoints: `InitSession`,
//! `AcceptTermsOfUse`, `UpdateFeature` and `Analyze`. All parameters go in
//! the query string; every call runs through [`send_with_retry`].

use super::retry::{RetryPolicy, send_with_retry};
use super::transport::{
    HttpMethod, HttpReply, HttpRequest, HttpTransport, ReqwestTransport, TransportError,
};
use advisor_application::{ApiError, DiagnosisApi, SessionGuard};
use advisor_domain::{AnalysisReport, AnalysisSource, Feature, SessionId};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.endlessmedical.com/v1/dx";

/// Passphrase the service expects when accepting its terms of use
pub const TERMS_PASSPHRASE: &str = "I have read, understood and I accept and agree to comply with the Terms of Use of EndlessMedicalAPI and Endless Medical services. The Terms of Use are available on endlessmedical.com";

/// Connection settings for [`EndlessMedicalClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct EndlessMedicalConfig {
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Timeout for the reachability check
    pub check_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for EndlessMedicalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            check_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

pub struct EndlessMedicalClient {
    config: EndlessMedicalConfig,
    transport: Arc<dyn HttpTransport>,
    guard: SessionGuard,
}

impl EndlessMedicalClient {
    /// Client over a real HTTP connection
    pub fn new(config: EndlessMedicalConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: EndlessMedicalConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            guard: SessionGuard::new(),
        }
    }

    pub fn config(&self) -> &EndlessMedicalConfig {
        &self.config
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), name)
    }

    fn request(&self, method: HttpMethod, endpoint: &str) -> HttpRequest {
        HttpRequest::new(method, self.endpoint(endpoint), self.config.timeout)
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpReply, ApiError> {
        debug!("{:?} {}", request.method, request.url);
        send_with_retry(self.transport.as_ref(), request, &self.config.retry).await
    }
}

fn parse_json(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|_| ApiError::InvalidJson)
}

fn session_id_from(payload: &Value) -> Result<SessionId, ApiError> {
    payload
        .get("SessionID")
        .and_then(Value::as_str)
        .and_then(|id| SessionId::new(id).ok())
        .ok_or(ApiError::MissingSessionId)
}

#[async_trait]
impl DiagnosisApi for EndlessMedicalClient {
    fn source(&self) -> AnalysisSource {
        AnalysisSource::Live
    }

    async fn create_session(&mut self) -> Result<SessionId, ApiError> {
        self.guard.close();

        let request = self.request(HttpMethod::Get, "InitSession");
        let session = match self
            .send(&request)
            .await
            .and_then(|reply| parse_json(&reply.body))
            .and_then(|payload| session_id_from(&payload))
        {
            Ok(session) => session,
            Err(e) => return self.guard.fail("create_session", e),
        };

        info!("Opened diagnosis session {}", session);
        self.guard.open(session.clone());
        Ok(session)
    }

    async fn accept_terms(&mut self, session: &SessionId) -> Result<(), ApiError> {
        if let Err(e) = self.guard.require_session(session) {
            return self.guard.fail("accept_terms", e);
        }

        let request = self
            .request(HttpMethod::Post, "AcceptTermsOfUse")
            .with_param("SessionID", session.as_str())
            .with_param("passphrase", TERMS_PASSPHRASE);
        if let Err(e) = self.send(&request).await {
            return self.guard.fail("accept_terms", e);
        }

        self.guard.accept_terms();
        debug!("Terms accepted for session {}", session);
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

        let request = self
            .request(HttpMethod::Post, "UpdateFeature")
            .with_param("SessionID", session.as_str())
            .with_param("name", name)
            .with_param("value", value);
        if let Err(e) = self.send(&request).await {
            return self.guard.fail("add_feature", e);
        }

        self.guard.record_feature(Feature::new(name, value));
        Ok(())
    }

    async fn analyze(&mut self, session: &SessionId) -> Result<AnalysisReport, ApiError> {
        if let Err(e) = self.guard.require_terms(session) {
            return self.guard.fail("analyze", e);
        }

        let request = self
            .request(HttpMethod::Get, "Analyze")
            .with_param("SessionID", session.as_str());
        match self
            .send(&request)
            .await
            .and_then(|reply| parse_json(&reply.body))
        {
            Ok(payload) => {
                let report = AnalysisReport::from_payload(payload);
                info!(
                    "Analysis returned {} candidate condition(s)",
                    report.conditions.len()
                );
                Ok(report)
            }
            Err(e) => self.guard.fail("analyze", e),
        }
    }

    async fn check_connection(&mut self) -> Result<(), ApiError> {
        let request = HttpRequest::new(
            HttpMethod::Get,
            self.endpoint("InitSession"),
            self.config.check_timeout,
        );
        match send_with_retry(self.transport.as_ref(), &request, &RetryPolicy::no_retry()).await {
            Ok(_) => Ok(()),
            Err(e) => self.guard.fail("check_connection", e),
        }
    }

    fn last_error(&self) -> String {
        self.guard.last_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endless_medical::test_support::ScriptedTransport;
    use advisor_application::UNKNOWN_ERROR;
    use tokio::time::Instant;

    const BASE: &str = "http://dx.test/v1/dx";

    fn client(transport: &Arc<ScriptedTransport>) -> EndlessMedicalClient {
        let config = EndlessMedicalConfig {
            base_url: BASE.to_string(),
            ..EndlessMedicalConfig::default()
        };
        EndlessMedicalClient::with_transport(config, transport.clone())
    }

    fn ok(body: &str) -> Result<HttpReply, TransportError> {
        Ok(HttpReply::new(200, body))
    }

    const SESSION_BODY: &str = r#"{"status":"ok","SessionID":"sess-1"}"#;

    #[tokio::test(start_paused = true)]
    async fn test_full_exchange_sends_expected_requests() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ok(SESSION_BODY),
            ok(r#"{"status":"ok"}"#),
            ok(r#"{"status":"ok"}"#),
            ok(r#"{"Conditions":[{"Name":"Hyperglycemia","Probability":0.5,"Ranking":1}]}"#),
        ]));
        let mut api = client(&transport);

        let session = api.create_session().await.unwrap();
        assert_eq!(session.as_str(), "sess-1");
        api.accept_terms(&session).await.unwrap();
        api.add_feature(&session, "Age", "45").await.unwrap();
        let report = api.analyze(&session).await.unwrap();

        assert_eq!(report.conditions.len(), 1);

        let requests = transport.requests();
        assert_eq!(requests[0].url, format!("{}/InitSession", BASE));
        assert_eq!(requests[0].method, HttpMethod::Get);

        assert_eq!(requests[1].url, format!("{}/AcceptTermsOfUse", BASE));
        assert_eq!(requests[1].method, HttpMethod::Post);
        assert_eq!(requests[1].param("SessionID"), Some("sess-1"));
        assert_eq!(requests[1].param("passphrase"), Some(TERMS_PASSPHRASE));

        assert_eq!(requests[2].url, format!("{}/UpdateFeature", BASE));
        assert_eq!(requests[2].param("name"), Some("Age"));
        assert_eq!(requests[2].param("value"), Some("45"));

        assert_eq!(requests[3].url, format!("{}/Analyze", BASE));
        assert_eq!(requests[3].method, HttpMethod::Get);
        assert_eq!(requests[3].timeout, Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_session_fails_after_three_timeouts() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
            Err(TransportError::Timeout),
        ]));
        let mut api = client(&transport);
        assert_eq!(api.last_error(), UNKNOWN_ERROR);

        let result = api.create_session().await;

        assert_eq!(result, Err(ApiError::Timeout));
        assert_eq!(transport.calls(), 3);
        assert_eq!(api.last_error(), "Request timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limited_session_retries_after_backoff() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(HttpReply::new(429, "")),
            ok(SESSION_BODY),
        ]));
        let mut api = client(&transport);

        let start = Instant::now();
        let session = api.create_session().await.unwrap();

        assert_eq!(session.as_str(), "sess-1");
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(HttpReply::new(500, ""))]));
        let mut api = client(&transport);

        assert_eq!(api.create_session().await, Err(ApiError::Status(500)));
        assert_eq!(transport.calls(), 1);
        assert_eq!(api.last_error(), "Status code 500");
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("<html>oops</html>")]));
        let mut api = client(&transport);

        assert_eq!(api.create_session().await, Err(ApiError::InvalidJson));
        assert_eq!(api.last_error(), "Invalid JSON response");
    }

    #[tokio::test]
    async fn test_missing_session_id() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(r#"{"status":"ok"}"#)]));
        let mut api = client(&transport);

        assert_eq!(api.create_session().await, Err(ApiError::MissingSessionId));
    }

    #[tokio::test]
    async fn test_feature_before_terms_is_rejected_locally() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(SESSION_BODY)]));
        let mut api = client(&transport);
        let session = api.create_session().await.unwrap();

        let result = api.add_feature(&session, "Diabetes", "yes").await;

        assert_eq!(result, Err(ApiError::TermsNotAccepted));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_calls_without_session_are_rejected() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let mut api = client(&transport);
        let stranger = SessionId::new("never-opened").unwrap();

        assert_eq!(
            api.accept_terms(&stranger).await,
            Err(ApiError::NoActiveSession)
        );
        assert_eq!(
            api.analyze(&stranger).await.map(|_| ()),
            Err(ApiError::NoActiveSession)
        );
        assert_eq!(api.last_error(), "No active session");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_with_malformed_body() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ok(SESSION_BODY),
            ok("{}"),
            ok("not json"),
        ]));
        let mut api = client(&transport);
        let session = api.create_session().await.unwrap();
        api.accept_terms(&session).await.unwrap();

        let result = api.analyze(&session).await;
        assert_eq!(result.map(|_| ()), Err(ApiError::InvalidJson));
    }

    #[tokio::test]
    async fn test_check_connection_is_single_attempt_and_records_failure() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(TransportError::Connect)]));
        let mut api = client(&transport);

        assert_eq!(api.check_connection().await, Err(ApiError::Connection));
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.requests()[0].timeout, Duration::from_secs(5));
        assert_eq!(api.last_error(), "Connection failed");
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(SESSION_BODY)]));
        let config = EndlessMedicalConfig {
            base_url: format!("{}/", BASE),
            ..EndlessMedicalConfig::default()
        };
        let mut api = EndlessMedicalClient::with_transport(config, transport.clone());

        api.create_session().await.unwrap();
        assert_eq!(transport.requests()[0].url, format!("{}/InitSession", BASE));
    }
}
