//! Client configuration

use crate::{ClientError, ClientResult};

/// Default remote data API endpoint
pub const DEFAULT_API_URL: &str = "https://innfo.top/App/api.php";

/// Default upload size limit (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Client configuration for the remote data API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint URL; every `gofor` operation goes to this single URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the upload size limit
    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Reads `.env` if present, then `PORTAL_API_URL`, `PORTAL_TIMEOUT_SECS`
    /// and `PORTAL_MAX_UPLOAD_BYTES`. Unset variables fall back to defaults;
    /// set but unparsable numbers are an error.
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            std::env::var("PORTAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
        );
        if let Some(timeout) = parse_env("PORTAL_TIMEOUT_SECS")? {
            config.timeout = timeout;
        }
        if let Some(bytes) = parse_env("PORTAL_MAX_UPLOAD_BYTES")? {
            config.max_upload_bytes = bytes;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be positive".into()));
        }
        Ok(())
    }
}

fn parse_env(name: &str) -> ClientResult<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{name} must be a number, got '{v}'"))),
        _ => Ok(None),
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
