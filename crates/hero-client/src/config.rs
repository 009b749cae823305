//! Superhero API client configuration.
//!
//! The access token is part of every request path, so it is held in a
//! [`Zeroizing`] buffer and never printed. Defaults point at the public
//! API; override via environment variables or explicit construction for
//! tests.

use url::Url;
use zeroize::Zeroizing;

/// Public superhero API base.
pub const DEFAULT_BASE_URL: &str = "https://www.superheroapi.com/api.php";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the superhero API.
///
/// Custom `Debug` implementation redacts the `access_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct SuperheroConfig {
    /// Base URL. Requests go to `{base_url}/{token}/search/{name}`.
    /// Default: <https://www.superheroapi.com/api.php>
    pub base_url: Url,
    /// Access token issued by the API.
    pub access_token: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SuperheroConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperheroConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SuperheroConfig {
    /// Configuration with an explicit base URL and token, default timeout.
    pub fn new(base_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            base_url,
            access_token: Zeroizing::new(access_token.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ACCESS_TOKEN` (required)
    /// - `SUPERHERO_BASE_URL` (default: `https://www.superheroapi.com/api.php`)
    /// - `SUPERHERO_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = get("ACCESS_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            base_url: env_url(&get, "SUPERHERO_BASE_URL", DEFAULT_BASE_URL)?,
            access_token: Zeroizing::new(token),
            timeout_secs: get("SUPERHERO_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

fn env_url(
    get: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = get(var).unwrap_or_else(|| default.to_string());
    let url = Url::parse(&raw)
        .map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "URL cannot carry path segments".to_string(),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ACCESS_TOKEN environment variable is required")]
    MissingToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
