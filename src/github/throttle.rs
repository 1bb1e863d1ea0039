//! Transport retry policy for rate-limit and abuse signals.
//!
//! The decision function is pure so the policy is testable without any
//! network I/O; the client applies it around each request.

use std::time::Duration;

/// A retryable condition reported by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrySignal {
    /// Primary rate limit, with the server-suggested delay
    RateLimited {
        /// How long the service asked us to wait
        retry_after: Duration,
    },
    /// Secondary rate limit (abuse detection)
    AbuseDetected,
}

/// Outcome of a retry decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Re-send the request after waiting the given delay
    RetryAfter(Duration),
    /// Give up and let the original failure propagate
    Abort,
}

/// Retry policy for the transport layer.
///
/// Rate-limited requests are re-sent at most once, after the server-suggested
/// delay. Abuse-detection signals are never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_rate_limit_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rate_limit_retries: 1,
        }
    }
}

impl RetryPolicy {
    /// Decide whether the request that produced `signal` should be re-sent.
    ///
    /// `attempt` counts re-sends already performed for this request.
    pub fn decide(&self, attempt: u32, signal: &RetrySignal) -> RetryDecision {
        match signal {
            RetrySignal::RateLimited { retry_after } if attempt < self.max_rate_limit_retries => {
                RetryDecision::RetryAfter(*retry_after)
            }
            RetrySignal::RateLimited { .. } => RetryDecision::Abort,
            RetrySignal::AbuseDetected => RetryDecision::Abort,
        }
    }
}
