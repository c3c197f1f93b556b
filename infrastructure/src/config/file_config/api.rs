//! Diagnosis service configuration from TOML (`[api]` section)

use crate::endless_medical::{DEFAULT_BASE_URL, EndlessMedicalConfig, RetryPolicy};
use advisor_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw `[api]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Service root, endpoint names are appended to it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Timeout of the `check-api` connectivity check in seconds
    pub check_timeout_secs: u64,
    /// Total attempts per request
    pub max_attempts: u32,
    /// Base backoff after a timeout or connection failure
    pub transient_backoff_ms: u64,
    /// Base backoff after HTTP 429
    pub rate_limit_backoff_ms: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            check_timeout_secs: 5,
            max_attempts: 3,
            transient_backoff_ms: 1000,
            rate_limit_backoff_ms: 1000,
        }
    }
}

impl FileApiConfig {
    pub fn to_client_config(&self) -> EndlessMedicalConfig {
        EndlessMedicalConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            check_timeout: Duration::from_secs(self.check_timeout_secs.max(1)),
            retry: RetryPolicy {
                max_attempts: self.max_attempts.max(1),
                transient_backoff: Duration::from_millis(self.transient_backoff_ms),
                rate_limit_backoff: Duration::from_millis(self.rate_limit_backoff_ms),
            },
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidUrl {
                    value: self.base_url.clone(),
                },
                message: format!("api.base_url: '{}' is not an http(s) URL", self.base_url),
            });
        }

        let zero_fields = [
            ("api.timeout_secs", self.timeout_secs == 0),
            ("api.check_timeout_secs", self.check_timeout_secs == 0),
            ("api.max_attempts", self.max_attempts == 0),
        ];
        for (field, _) in zero_fields.iter().filter(|(_, zero)| *zero) {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ZeroValue {
                    field: field.to_string(),
                },
                message: format!("{}: cannot be 0, using 1", field),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_client_defaults() {
        assert_eq!(
            FileApiConfig::default().to_client_config(),
            EndlessMedicalConfig::default()
        );
    }

    #[test]
    fn test_backoff_from_millis() {
        let toml_str = r#"
[api]
rate_limit_backoff_ms = 250
max_attempts = 5
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let client = config.api.to_client_config();
        assert_eq!(client.retry.rate_limit_backoff, Duration::from_millis(250));
        assert_eq!(client.retry.max_attempts, 5);
        assert_eq!(client.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_zero_values_are_warned_and_clamped() {
        let config = FileApiConfig {
            timeout_secs: 0,
            max_attempts: 0,
            ..FileApiConfig::default()
        };

        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| !i.is_error()));

        let client = config.to_client_config();
        assert_eq!(client.timeout, Duration::from_secs(1));
        assert_eq!(client.retry.max_attempts, 1);
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let config = FileApiConfig {
            base_url: "ftp://example.com".to_string(),
            ..FileApiConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }
}
