//! Runtime configuration from the environment.
//!
//! Values are read from the process environment, after loading a `.env`
//! file if one is present.

use std::time::Duration;

use thiserror::Error;

use crate::api::TransitApiConfig;
use crate::feed::{DEFAULT_RECONNECT_DELAY, FeedConfig};

/// HTTP API base URL.
pub const API_URL_VAR: &str = "TRANSIT_API_URL";
/// Websocket base URL.
pub const WS_URL_VAR: &str = "TRANSIT_WS_URL";
/// Optional key for map imagery.
pub const MAPS_KEY_VAR: &str = "MAPS_API_KEY";
/// Optional feed reconnect delay in milliseconds; must be positive.
pub const RECONNECT_MS_VAR: &str = "FEED_RECONNECT_MS";

/// Errors reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub ws_url: String,
    pub maps_api_key: Option<String>,
    pub reconnect_delay: Duration,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| dotenvy::var(var).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_url = get(API_URL_VAR).ok_or(ConfigError::Missing(API_URL_VAR))?;
        let ws_url = get(WS_URL_VAR).ok_or(ConfigError::Missing(WS_URL_VAR))?;
        let maps_api_key = get(MAPS_KEY_VAR);

        let reconnect_delay = match get(RECONNECT_MS_VAR) {
            // Zero would retry a refusing host in a tight loop
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: RECONNECT_MS_VAR,
                        value,
                    });
                }
            },
            None => DEFAULT_RECONNECT_DELAY,
        };

        Ok(Self {
            api_url,
            ws_url,
            maps_api_key,
            reconnect_delay,
        })
    }

    /// Client configuration for the HTTP API.
    pub fn api_config(&self) -> TransitApiConfig {
        TransitApiConfig::new(&self.api_url)
    }

    /// Client configuration for the position feed.
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::new(&self.ws_url).with_reconnect_delay(self.reconnect_delay)
    }
}
