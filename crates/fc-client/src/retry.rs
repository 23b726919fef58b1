use std::time::Duration;

use reqwest::StatusCode;

const DEFAULT_BASE_BACKOFF_MS: u64 = 200;

/// How many times a failed request is re-sent, and how long to wait in between.
///
/// The default performs a single attempt. Only transport failures and
/// 408/429/5xx responses are retried, with exponential backoff
/// (`base_backoff * 2^attempt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// Single attempt, never retry
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
        }
    }

    pub const fn new(max_retries: u32, base_backoff: Duration) -> Self {
        Self {
            max_retries,
            base_backoff,
        }
    }

    /// Delay before retry number `attempt` (zero-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_backoff
            .saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX))
    }

    pub fn is_retryable_status(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS
            || status == StatusCode::REQUEST_TIMEOUT
            || status.is_server_error()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
