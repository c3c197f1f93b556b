//! Port for structured API exchange logging.
//!
//! Defines the [`ExchangeLogger`] trait for recording what was sent to and
//! received from the diagnostic service during an assessment.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! exchange in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured exchange event for logging.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. The writer adds the timestamp.
pub struct ExchangeEvent {
    /// Event type identifier (e.g., "session_created", "feature_added").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExchangeEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging exchange events to a structured log.
///
/// The `log` method is synchronous and infallible; logging failures are
/// ignored so they never disturb an assessment.
pub trait ExchangeLogger: Send + Sync {
    /// Record an exchange event.
    fn log(&self, event: ExchangeEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExchangeLogger;

impl ExchangeLogger for NoExchangeLogger {
    fn log(&self, _event: ExchangeEvent) {}
}
