//! Environment-driven client configuration.

use std::time::Duration;

use socialfeed_api::Client;

use crate::error::SocialFeedError;

pub const BASE_URL_VAR: &str = "SOCIALFEED_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "SOCIALFEED_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    /// `None` waits indefinitely, matching a browser `fetch`.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Reads `SOCIALFEED_API_BASE_URL` (required) and
    /// `SOCIALFEED_TIMEOUT_SECS` (optional) from the process environment.
    pub fn from_env() -> Result<Self, SocialFeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SocialFeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SocialFeedError::Config(format!("{} is not set", BASE_URL_VAR)))?;

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    SocialFeedError::Config(format!(
                        "{} must be a whole number of seconds, got '{}'",
                        TIMEOUT_VAR, raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            api_base_url,
            timeout,
        })
    }

    /// Builds the API client this configuration describes.
    pub fn client(&self) -> Result<Client, SocialFeedError> {
        tracing::debug!(base_url = %self.api_base_url, timeout = ?self.timeout, "building client");
        Ok(Client::with_timeout(&self.api_base_url, self.timeout)?)
    }
}
