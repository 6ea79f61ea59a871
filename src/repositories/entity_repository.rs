use crate::client::{AsyncRecordGateway, DeleteRequest, FetchQuery, WriteRequest, WriteResponse};
use crate::error::{GatewayError, GatewayResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Typed access to one entity of the record store.
///
/// The repository turns the store's `{success, data, results, message}`
/// envelopes into plain `Result`s. It never swallows errors; deciding whether
/// a failure becomes an empty result is left to the services.
#[derive(Clone)]
pub struct EntityRepository {
    client: Arc<dyn AsyncRecordGateway>,
    entity: &'static str,
}

impl EntityRepository {
    /// Create a repository for `entity` (e.g. `"contact_c"`).
    pub fn new(client: Arc<dyn AsyncRecordGateway>, entity: &'static str) -> Self {
        Self { client, entity }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Fetch and decode every record matching `query`.
    pub async fn fetch<R: DeserializeOwned>(&self, query: &FetchQuery) -> GatewayResult<Vec<R>> {
        let response = self.client.fetch_records(self.entity, query).await?;

        if !response.success {
            return Err(rejected(response.message));
        }

        response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Fetch one record. `Ok(None)` when the store has no data for `id`.
    pub async fn get<R: DeserializeOwned>(
        &self,
        id: i64,
        query: &FetchQuery,
    ) -> GatewayResult<Option<R>> {
        let response = self.client.get_record_by_id(self.entity, id, query).await?;

        if !response.success {
            return Err(rejected(response.message));
        }

        match response.data {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(value).map(Some),
        }
    }

    /// Create one record and return the stored copy.
    pub async fn create_one<R, P>(&self, payload: &P) -> GatewayResult<Option<R>>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let request = WriteRequest::single(serde_json::to_value(payload)?);
        let response = self.client.create_record(self.entity, &request).await?;
        self.write_outcome("create", response)
    }

    /// Update one record (the payload carries its `Id`) and return the stored copy.
    pub async fn update_one<R, P>(&self, payload: &P) -> GatewayResult<Option<R>>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let request = WriteRequest::single(serde_json::to_value(payload)?);
        let response = self.client.update_record(self.entity, &request).await?;
        self.write_outcome("update", response)
    }

    /// Delete one record by primary key.
    pub async fn delete_one(&self, id: i64) -> GatewayResult<()> {
        let request = DeleteRequest {
            record_ids: vec![id],
        };
        let response = self.client.delete_record(self.entity, &request).await?;

        if !response.success {
            return Err(rejected(response.message));
        }

        if response.failed_count() > 0 {
            tracing::error!(
                entity = self.entity,
                "Failed to delete records: {:?}",
                response.results
            );
            let message = response
                .first_failure_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Failed to delete record {}", id));
            return Err(GatewayError::RecordFailed(message));
        }

        Ok(())
    }

    /// Unwrap a batch write of a single record.
    ///
    /// The first failed record carrying a message wins; otherwise the data of
    /// the first successful record is returned, or `None` when there is none.
    fn write_outcome<R: DeserializeOwned>(
        &self,
        action: &str,
        response: WriteResponse,
    ) -> GatewayResult<Option<R>> {
        if !response.success {
            return Err(rejected(response.message));
        }

        if response.failed_count() > 0 {
            tracing::error!(
                entity = self.entity,
                "Failed to {} records: {:?}",
                action,
                response.results
            );
            if let Some(message) = response.first_failure_message() {
                return Err(GatewayError::RecordFailed(message.to_string()));
            }
        }

        response
            .first_success_data()
            .cloned()
            .map(decode)
            .transpose()
    }
}

fn rejected(message: Option<String>) -> GatewayError {
    GatewayError::Rejected(message.unwrap_or_else(|| "Request was not successful".to_string()))
}

fn decode<R: DeserializeOwned>(value: Value) -> GatewayResult<R> {
    Ok(serde_json::from_value(value)?)
}
