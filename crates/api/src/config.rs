use std::env;
use std::time::Duration;

use url::Url;

use crate::error::TransportError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the trivia API lives. Injected into the client at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `TransportError::Url` if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            base_url: Url::parse(base_url.trim())?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads `TRIVIA_API_URL` and `TRIVIA_API_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Url` if `TRIVIA_API_URL` is set but invalid.
    pub fn from_env() -> Result<Self, TransportError> {
        let base_url = env::var("TRIVIA_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout = env::var("TRIVIA_API_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Ok(Self::new(&base_url)?.with_timeout(timeout))
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for `path` below the base, e.g. `questions/searches`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
