//! Async wrapper around the synchronous RecordClient.
//!
//! This module provides an async interface to the synchronous RecordClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{
    DeleteRequest, FetchQuery, FetchResponse, RecordClient, RecordResponse, WriteRequest,
    WriteResponse,
};
use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use std::sync::Arc;

/// The record gateway seen by the services.
///
/// Implemented over HTTP by [`AsyncRecordClient`]; tests substitute an
/// in-memory store.
#[async_trait]
pub trait AsyncRecordGateway: Send + Sync {
    async fn fetch_records(&self, entity: &str, query: &FetchQuery) -> GatewayResult<FetchResponse>;

    async fn get_record_by_id(
        &self,
        entity: &str,
        id: i64,
        query: &FetchQuery,
    ) -> GatewayResult<RecordResponse>;

    async fn create_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse>;

    async fn update_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse>;

    async fn delete_record(&self, entity: &str, request: &DeleteRequest) -> GatewayResult<WriteResponse>;
}

/// Async wrapper around synchronous RecordClient.
#[derive(Clone)]
pub struct AsyncRecordClient {
    client: Arc<RecordClient>,
}

impl AsyncRecordClient {
    pub fn new(client: RecordClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn inner(&self) -> &RecordClient {
        &self.client
    }
}

fn join_error(e: tokio::task::JoinError) -> GatewayError {
    GatewayError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncRecordGateway for AsyncRecordClient {
    async fn fetch_records(&self, entity: &str, query: &FetchQuery) -> GatewayResult<FetchResponse> {
        let client = self.client.clone();
        let entity = entity.to_string();
        let query = query.clone();

        tokio::task::spawn_blocking(move || client.fetch_records(&entity, &query))
            .await
            .map_err(join_error)?
    }

    async fn get_record_by_id(
        &self,
        entity: &str,
        id: i64,
        query: &FetchQuery,
    ) -> GatewayResult<RecordResponse> {
        let client = self.client.clone();
        let entity = entity.to_string();
        let query = query.clone();

        tokio::task::spawn_blocking(move || client.get_record_by_id(&entity, id, &query))
            .await
            .map_err(join_error)?
    }

    async fn create_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse> {
        let client = self.client.clone();
        let entity = entity.to_string();
        let request = request.clone();

        tokio::task::spawn_blocking(move || client.create_record(&entity, &request))
            .await
            .map_err(join_error)?
    }

    async fn update_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse> {
        let client = self.client.clone();
        let entity = entity.to_string();
        let request = request.clone();

        tokio::task::spawn_blocking(move || client.update_record(&entity, &request))
            .await
            .map_err(join_error)?
    }

    async fn delete_record(&self, entity: &str, request: &DeleteRequest) -> GatewayResult<WriteResponse> {
        let client = self.client.clone();
        let entity = entity.to_string();
        let request = request.clone();

        tokio::task::spawn_blocking(move || client.delete_record(&entity, &request))
            .await
            .map_err(join_error)?
    }
}
