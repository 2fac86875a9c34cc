//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Base URL of the public MEATER Cloud API.
pub const DEFAULT_BASE_URL: &str = "https://public-api.cloud.meater.com/v1/";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "MEATER_API_URL";

/// Environment variable overriding the request timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "MEATER_TIMEOUT_SECS";

/// Settings used to build the default HTTP transport and resolve endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root. Always ends in `/` so endpoint paths join relative to it.
    pub base_url: Url,
    /// Per-request timeout applied by the transport.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Default request timeout (10 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the defaults overridden by
    /// `MEATER_API_URL` and `MEATER_TIMEOUT_SECS` when they are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(&url)?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| Error::InvalidParameter {
                    name: ENV_TIMEOUT_SECS.to_string(),
                    value: secs.clone(),
                })?;
            config = config.with_timeout(Duration::from_secs(parsed));
        }

        Ok(config)
    }

    /// Set the API root.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Absolute URL; a trailing `/` is added if missing
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `base_url` does not parse.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: format!("meater-cloud/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let invalid = || Error::InvalidParameter {
        name: "base_url".to_string(),
        value: raw.to_string(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
