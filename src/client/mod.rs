//! HTTP client for the remote record store.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication, error mapping,
//! and the fetch/get/create/update/delete envelopes of the store.

mod async_wrapper;
pub mod query;
pub mod response;

pub use async_wrapper::{AsyncRecordClient, AsyncRecordGateway};
pub use query::{FetchQuery, SortType};
pub use response::{
    DeleteRequest, FetchResponse, RecordResponse, RecordResult, WriteRequest, WriteResponse,
};

use crate::config::Config;
use crate::error::{GatewayError, GatewayResult};
use crate::metrics::{HttpTimer, Metrics};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the record store.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct RecordClient {
    /// Base URL for the record store
    base_url: String,

    /// Project the records belong to
    project_id: String,

    /// Public key for authentication
    public_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl RecordClient {
    /// Create a new RecordClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a RecordClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, project_id: String, public_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            project_id,
            public_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn entity_path(entity: &str) -> String {
        format!("/records/{}", urlencoding::encode(entity))
    }

    /// Execute an authenticated request with a JSON body.
    fn send<B: Serialize>(&self, method: &str, path: &str, body: &B) -> GatewayResult<ureq::Response> {
        let url = self.build_url(path);
        let timer = HttpTimer::new(self.metrics.clone());

        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                "{} {} body: {}",
                method,
                url,
                serde_json::to_string(body).unwrap_or_else(|_| "<invalid json>".to_string())
            );
        }

        let result = self
            .agent
            .request(method, &url)
            .set("x-project-id", &self.project_id)
            .set("x-public-key", &self.public_key)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - status {}", method, url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::error!("{} {} - Error: {:?}", method, url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Decode a JSON response body.
    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> GatewayResult<T> {
        let body = response
            .into_string()
            .map_err(|e| GatewayError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(GatewayError::JsonError)
    }

    /// Map a ureq error to a GatewayError.
    fn map_error(&self, error: ureq::Error) -> GatewayError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let message = extract_message(&body);

                match code {
                    401 => GatewayError::Unauthorized,
                    404 => GatewayError::NotFound(message),
                    429 => GatewayError::RateLimitExceeded,
                    _ => GatewayError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    GatewayError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    GatewayError::Timeout
                } else {
                    GatewayError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Fetch the records of `entity` matching `query`.
    pub fn fetch_records(&self, entity: &str, query: &FetchQuery) -> GatewayResult<FetchResponse> {
        let path = format!("{}/query", Self::entity_path(entity));
        let response: FetchResponse = Self::read_json(self.send("POST", &path, query)?)?;

        if let Some(data) = &response.data {
            self.metrics.record_records_fetched(data.len());
        }
        Ok(response)
    }

    /// Fetch a single record by primary key.
    pub fn get_record_by_id(
        &self,
        entity: &str,
        id: i64,
        query: &FetchQuery,
    ) -> GatewayResult<RecordResponse> {
        let path = format!("{}/{}/query", Self::entity_path(entity), id);
        let response: RecordResponse = Self::read_json(self.send("POST", &path, query)?)?;

        if response.data.is_some() {
            self.metrics.record_records_fetched(1);
        }
        Ok(response)
    }

    /// Create the records in `request`. The store assigns primary keys.
    pub fn create_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse> {
        let response: WriteResponse =
            Self::read_json(self.send("POST", &Self::entity_path(entity), request)?)?;
        self.metrics.record_records_written(request.records.len());
        Ok(response)
    }

    /// Update the records in `request`; each record must carry its `Id`.
    pub fn update_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse> {
        let response: WriteResponse =
            Self::read_json(self.send("PUT", &Self::entity_path(entity), request)?)?;
        self.metrics.record_records_written(request.records.len());
        Ok(response)
    }

    /// Delete the records listed in `request`.
    pub fn delete_record(&self, entity: &str, request: &DeleteRequest) -> GatewayResult<WriteResponse> {
        let response: WriteResponse =
            Self::read_json(self.send("DELETE", &Self::entity_path(entity), request)?)?;
        self.metrics.record_records_written(request.record_ids.len());
        Ok(response)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks for `message`, then `data.message`, and falls back to the raw body.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let nested = value
            .get("message")
            .or_else(|| value.get("data").and_then(|d| d.get("message")))
            .and_then(|m| m.as_str());
        if let Some(message) = nested {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
