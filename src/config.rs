//! Configuration management for the CRM services.
//!
//! This module handles loading and validating configuration from environment variables,
//! reading a `.env` file first when one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the record store client and services.
#[derive(Debug, Clone)]
pub struct Config {
    /// Record store base URL
    pub api_base_url: String,

    /// Project identifier sent with every request
    pub project_id: String,

    /// Public key for authentication
    pub public_key: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Default number of activities returned by `get_recent` (default: 10)
    pub recent_activity_limit: usize,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CRM_API_BASE_URL`: Base URL for the record store
    /// - `CRM_PROJECT_ID`: Project identifier
    /// - `CRM_PUBLIC_KEY`: Public key for authentication
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `RECENT_ACTIVITY_LIMIT`: Default recent-activity page size (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = Self::required("CRM_API_BASE_URL")?;
        let project_id = Self::required("CRM_PROJECT_ID")?;
        let public_key = Self::required("CRM_PUBLIC_KEY")?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "CRM_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let recent_activity_limit = Self::parse_env_usize("RECENT_ACTIVITY_LIMIT", 10)?;

        if recent_activity_limit == 0 {
            return Err(ConfigError::InvalidValue {
                var: "RECENT_ACTIVITY_LIMIT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            project_id,
            public_key,
            request_timeout,
            recent_activity_limit,
            log_level,
        })
    }

    /// Read a required, non-blank environment variable.
    fn required(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }
        Ok(value)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            project_id: String::new(),
            public_key: String::new(),
            request_timeout: 10,
            recent_activity_limit: 10,
            log_level: "error".to_string(),
        }
    }
}
