//! Retry loop with exponential backoff.
//!
//! - timeouts and refused connections are retried after
//!   `transient_backoff * 2^attempt`
//! - HTTP 429 is retried after `rate_limit_backoff * 2^attempt`
//! - any other non-200 status, and any other transport failure, fails at once
//!
//! `attempt` counts from 0, so the first rate-limit wait is one base unit.

use super::transport::{HttpReply, HttpRequest, HttpTransport};
use advisor_application::ApiError;
use std::time::Duration;
use tracing::{debug, warn};

const STATUS_OK: u16 = 200;
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Retry configuration for one remote call
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per call, the first one included
    pub max_attempts: u32,
    /// Base wait after a timeout or connection failure
    pub transient_backoff: Duration,
    /// Base wait after HTTP 429
    pub rate_limit_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            transient_backoff: Duration::from_secs(1),
            rate_limit_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no waiting
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn transient_delay(&self, attempt: u32) -> Duration {
        scaled(self.transient_backoff, attempt)
    }

    pub fn rate_limit_delay(&self, attempt: u32) -> Duration {
        scaled(self.rate_limit_backoff, attempt)
    }
}

fn scaled(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Send `request`, retrying per `policy`, until a 200 reply arrives.
pub async fn send_with_retry(
    transport: &dyn HttpTransport,
    request: &HttpRequest,
    policy: &RetryPolicy,
) -> Result<HttpReply, ApiError> {
    let attempts = policy.max_attempts.max(1);
    let mut last_err = ApiError::Transport("no attempt made".to_string());

    for attempt in 0..attempts {
        let is_last = attempt + 1 == attempts;

        let delay = match transport.send(request).await {
            Ok(reply) if reply.status == STATUS_OK => return Ok(reply),
            Ok(reply) if reply.status == STATUS_TOO_MANY_REQUESTS => {
                last_err = ApiError::Status(reply.status);
                policy.rate_limit_delay(attempt)
            }
            Ok(reply) => return Err(ApiError::Status(reply.status)),
            Err(e) => {
                let err = ApiError::from(e);
                if !err.is_transient() {
                    return Err(err);
                }
                last_err = err;
                policy.transient_delay(attempt)
            }
        };

        if is_last {
            break;
        }

        warn!(
            "{} failed ({}), attempt {}/{}, retrying in {:?}",
            request.url,
            last_err,
            attempt + 1,
            attempts,
            delay
        );
        tokio::time::sleep(delay).await;
        debug!("retrying {}", request.url);
    }

    Err(last_err)
}
