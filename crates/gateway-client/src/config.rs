//! Gateway credentials.
//!
//! Built once at startup and handed to [`crate::client::GatewayClient::new`]; never mutated
//! afterwards.

use std::fmt;
use thiserror::Error;
use url::Url;

pub const BASE_URL_VAR: &str = "EVOLUTION_BASE_URL";
pub const API_KEY_VAR: &str = "EVOLUTION_API_KEY";
pub const INSTANCE_VAR: &str = "EVOLUTION_INSTANCE";

/// All variables that must be set for the process to start.
pub const REQUIRED_VARS: [&str; 3] = [BASE_URL_VAR, API_KEY_VAR, INSTANCE_VAR];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}")]
    Missing { var: &'static str },

    #[error("Invalid EVOLUTION_BASE_URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Base URL, API key and instance identifier of the remote gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
    api_key: String,
    instance: String,
}

impl GatewayConfig {
    /// Validate and build the credentials.
    ///
    /// A trailing `/` on the base URL is dropped so endpoint paths (which start with `/`) can be
    /// appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if any value is absent or empty, and
    /// [`ConfigError::InvalidBaseUrl`] if the base URL is not an absolute `http(s)` URL.
    pub fn new(
        base_url: Option<String>,
        api_key: Option<String>,
        instance: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = required(base_url, BASE_URL_VAR)?;
        let api_key = required(api_key, API_KEY_VAR)?;
        let instance = required(instance, INSTANCE_VAR)?;

        let parsed = Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url,
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            instance,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("instance", &self.instance)
            .finish()
    }
}

fn required(value: Option<String>, var: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Missing { var }),
    }
}
