//! Backend Configuration
//!
//! Where the backend lives and how requests to it are issued.

use std::time::Duration;

/// Fallback base URL when nothing was configured at build time
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Environment variable holding the backend base URL
pub const BACKEND_URL_ENV: &str = "SCATCH_BACKEND_URL";

/// Environment variable holding the request timeout in seconds (`0` disables it)
pub const REQUEST_TIMEOUT_ENV: &str = "SCATCH_REQUEST_TIMEOUT_SECS";

/// Backend client configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Whole-request timeout; `None` waits forever
    pub request_timeout: Option<Duration>,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Path that issues pre-signed upload tickets
    pub presign_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("SCATCH_BACKEND_URL")
                .unwrap_or(DEFAULT_BACKEND_URL)
                .trim_end_matches('/')
                .to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            user_agent: format!("scatch-client/{}", env!("CARGO_PKG_VERSION")),
            presign_path: "/api/uploads/presign".to_string(),
        }
    }
}

impl BackendConfig {
    /// Config pointing at an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Build-time defaults overridden by the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }

        if let Ok(raw) = std::env::var(REQUEST_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => config.request_timeout = None,
                Ok(secs) => config.request_timeout = Some(Duration::from_secs(secs)),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Ignoring invalid request timeout");
                }
            }
        }

        config
    }

    /// Config for a local backend (short timeout)
    pub fn development() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Some(Duration::from_secs(10)),
            ..Default::default()
        }
    }

    /// Absolute URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Get request timeout in milliseconds
    pub fn request_timeout_ms(&self) -> Option<i64> {
        self.request_timeout.map(|t| t.as_millis() as i64)
    }
}
