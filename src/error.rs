//! Error types for the CRM services.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the remote record store.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The store answered with `success: false`
    #[error("{0}")]
    Rejected(String),

    /// A single record inside a batch write failed
    #[error("{0}")]
    RecordFailed(String),
}

/// Errors raised by the in-memory task store and the completion workflow.
#[derive(Error, Debug)]
pub enum TaskError {
    /// No task with the given id exists
    #[error("Task not found: {0}")]
    NotFound(i64),

    /// Logging the completed task as an activity failed
    #[error("Failed to record activity: {0}")]
    Activity(#[from] GatewayError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Convenience type alias for Results with TaskError
pub type TaskResult<T> = Result<T, TaskError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
