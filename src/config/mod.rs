// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_LOG_LEVEL, DEFAULT_SERVER_TIME_ENDPOINT, DEFAULT_SERVER_TIME_TIMEOUT_SECS,
};
use crate::error::{CfnSphereError, Result};
use crate::retry::RetryPolicy;

pub mod retry;

pub use retry::RetryConfigYaml;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Only needed by callers that retry; fields are required when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfigYaml>,
    #[serde(default)]
    pub server_time: ServerTimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_server_time_endpoint() -> String {
    DEFAULT_SERVER_TIME_ENDPOINT.to_string()
}

fn default_server_time_timeout_secs() -> u64 {
    DEFAULT_SERVER_TIME_TIMEOUT_SECS
}

/// Where the API server time is read from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerTimeConfig {
    #[serde(default = "default_server_time_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_server_time_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerTimeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_server_time_endpoint(),
            timeout_secs: default_server_time_timeout_secs(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// EnvFilter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CfnSphereError::Config(e.to_string()))?;

        let mut missing = None;
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });

        if let Some(var_name) = missing {
            return Err(CfnSphereError::Config(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            )));
        }

        let config: Config = serde_yaml::from_str(&substituted)
            .map_err(|e| CfnSphereError::Config(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| CfnSphereError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Retry policy from the `retry` section, if the file has one
    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        self.retry.as_ref().map(RetryConfigYaml::to_retry_policy)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(retry) = &self.retry {
            retry.validate().map_err(CfnSphereError::Config)?;
        }

        if self.server_time.endpoint.is_empty() {
            return Err(CfnSphereError::Config(
                "server_time.endpoint cannot be empty".to_string(),
            ));
        }

        if !self.server_time.endpoint.starts_with("http://")
            && !self.server_time.endpoint.starts_with("https://")
        {
            return Err(CfnSphereError::Config(format!(
                "server_time.endpoint '{}' must be an http(s) URL",
                self.server_time.endpoint
            )));
        }

        Ok(())
    }
}
