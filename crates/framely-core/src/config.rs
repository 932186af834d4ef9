//! Configuration module
//!
//! Console settings loaded from the environment (and `.env`): where the
//! resource API lives, the public site used for share links, the request
//! timeout and where the CLI keeps its session token.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOKEN_FILE, DEFAULT_USER_SITE_URL,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be an http(s) URL with a host, got {value:?}")]
    InvalidUrl { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub user_site_url: String,
    pub request_timeout: Duration,
    pub token_file: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_site_url: DEFAULT_USER_SITE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

impl ConsoleConfig {
    /// Load from the process environment after reading `.env` if present.
    ///
    /// `FRAMELY_API_URL` (or `API_URL`), `FRAMELY_USER_SITE_URL` (or
    /// `USER_SITE_URL`), `FRAMELY_REQUEST_TIMEOUT_SECS`, `FRAMELY_TOKEN_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(*k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let api_url = first_set(&["FRAMELY_API_URL", "API_URL"])
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = validate_url("FRAMELY_API_URL", api_url)?;

        let user_site_url = first_set(&["FRAMELY_USER_SITE_URL", "USER_SITE_URL"])
            .unwrap_or_else(|| DEFAULT_USER_SITE_URL.to_string());
        let user_site_url = validate_url("FRAMELY_USER_SITE_URL", user_site_url)?;

        let request_timeout = match first_set(&["FRAMELY_REQUEST_TIMEOUT_SECS"]) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "FRAMELY_REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let token_file = first_set(&["FRAMELY_TOKEN_FILE"])
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));

        Ok(Self {
            api_url,
            user_site_url,
            request_timeout,
            token_file,
        })
    }
}

/// Base URLs are joined with request paths, so a query or fragment is refused.
fn validate_url(key: &'static str, value: String) -> Result<String, ConfigError> {
    let valid = match Url::parse(&value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
                && url.query().is_none()
                && url.fragment().is_none()
        }
        Err(_) => false,
    };
    if !valid {
        return Err(ConfigError::InvalidUrl { key, value });
    }
    Ok(value.trim_end_matches('/').to_string())
}
