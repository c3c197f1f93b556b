//! Configuration issue reporting.
//!
//! Configuration problems are collected rather than failing on the first
//! one, so every issue can be shown to the user at once.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A numeric setting that must be positive is zero.
    ZeroValue { field: String },
    /// The service base URL is empty or not http(s).
    InvalidUrl { value: String },
    /// Demo mode forced while fallback is disabled; the flag wins.
    ConflictingFallback,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
