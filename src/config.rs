//! Configuration management for the quotagate client.

use serde::{Deserialize, Serialize};

use crate::error::{QuotagateError, Result};
use crate::ratelimit::TimeWindow;

/// Configuration for a [`RegistrationClient`](crate::submit::RegistrationClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Registration API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Maximum submissions admitted per window
    #[serde(default = "default_capacity")]
    pub capacity: u32,

    /// Window after which capacity is fully replenished
    #[serde(default = "default_window")]
    pub window: TimeWindow,

    /// Per-request timeout for the HTTP transport, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            capacity: default_capacity(),
            window: default_window(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://ismp.crpt.ru/api/v3/lk/documents/create".to_string()
}

fn default_capacity() -> u32 {
    3
}

fn default_window() -> TimeWindow {
    TimeWindow::Minute
}

fn default_request_timeout() -> u64 {
    30
}

impl ClientConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_yaml::from_str(&contents)
            .map_err(|e| QuotagateError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable. Zero capacity is a fatal error.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(QuotagateError::Config(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(QuotagateError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
