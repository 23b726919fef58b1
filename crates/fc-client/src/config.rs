use std::time::Duration;

use serde::Deserialize;

use crate::retry::RetryPolicy;

/// Base URL used when `FLASHCARDS_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

const ENV_PREFIX: &str = "FLASHCARDS_";

/// Client settings.
///
/// Timeouts and retries are opt-in: the default sends every request once and
/// relies on the transport's own timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

/// Environment layout, read with the `FLASHCARDS_` prefix
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "default_api_url")]
    api_url: String,
    timeout_secs: Option<u64>,
    #[serde(default)]
    max_retries: u32,
    retry_backoff_ms: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from `FLASHCARDS_API_URL`, `FLASHCARDS_TIMEOUT_SECS`,
    /// `FLASHCARDS_MAX_RETRIES` and `FLASHCARDS_RETRY_BACKOFF_MS`
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<EnvConfig>()
            .map(Self::from)
    }

    /// Same as [`ClientConfig::from_env`], reading from the given key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, EnvConfig>(vars)
            .map(Self::from)
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            retry: RetryPolicy::none(),
        }
    }
}

impl From<EnvConfig> for ClientConfig {
    fn from(env: EnvConfig) -> Self {
        let mut retry = RetryPolicy::none();
        retry.max_retries = env.max_retries;
        if let Some(ms) = env.retry_backoff_ms {
            retry.base_backoff = Duration::from_millis(ms);
        }

        Self {
            base_url: env.api_url,
            timeout: env.timeout_secs.map(Duration::from_secs),
            retry,
        }
    }
}
