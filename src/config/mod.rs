//! Environment-driven configuration for the remote data gateway.
//!
//! Defaults target a local development API; both values can be overridden:
//!
//! - `PROMPT_CONSOLE_API_URL` - base URL of the management API
//! - `PROMPT_CONSOLE_TIMEOUT_SECS` - per-request timeout in seconds

use std::env;
use std::time::Duration;

use crate::error::ConsoleError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

pub const ENV_API_URL: &str = "PROMPT_CONSOLE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PROMPT_CONSOLE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConsoleError> {
        Self::from_vars(env::var(ENV_API_URL).ok(), env::var(ENV_TIMEOUT_SECS).ok())
    }

    fn from_vars(
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, ConsoleError> {
        let base_url = base_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match timeout_secs {
            Some(raw) => {
                let value = raw.trim();
                if value.is_empty() {
                    DEFAULT_TIMEOUT_SECS
                } else {
                    let parsed = value.parse::<u64>().map_err(|_| {
                        ConsoleError::Config(format!(
                            "{ENV_TIMEOUT_SECS} must be a non-zero integer"
                        ))
                    })?;
                    if parsed == 0 {
                        return Err(ConsoleError::Config(format!(
                            "{ENV_TIMEOUT_SECS} must be a non-zero integer"
                        )));
                    }
                    parsed
                }
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self { base_url, timeout: Duration::from_secs(timeout_secs) })
    }
}
