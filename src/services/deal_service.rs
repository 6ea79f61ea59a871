//! Deal service layer.

use super::policy;
use crate::client::{AsyncRecordGateway, FetchQuery};
use crate::error::GatewayResult;
use crate::models::deal::{
    DEAL_DETAIL_FIELDS, DEAL_ENTITY, DEAL_FIELDS, DEAL_SEARCH_FIELDS, DEAL_STAGE_FIELDS,
    DEAL_TEXT_FIELDS,
};
use crate::models::{Deal, DealInput, DealPayload};
use crate::repositories::EntityRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Deal service trait for business operations.
#[async_trait]
pub trait DealService: Send + Sync {
    async fn get_all(&self) -> Vec<Deal>;

    /// One deal, or `None` when missing or unreadable.
    async fn get_by_id(&self, id: i64) -> Option<Deal>;

    /// Create a deal. The stage defaults to "Lead".
    async fn create(&self, input: &DealInput) -> GatewayResult<Option<Deal>>;

    async fn update(&self, id: i64, input: &DealInput) -> GatewayResult<Option<Deal>>;

    async fn delete(&self, id: i64) -> GatewayResult<()>;

    /// Deals whose name, company or stage contains `query`.
    async fn search(&self, query: &str) -> Vec<Deal>;

    /// Deals in exactly `stage`.
    async fn get_by_stage(&self, stage: &str) -> Vec<Deal>;
}

/// Default implementation of DealService.
pub struct DealServiceImpl {
    repo: EntityRepository,
}

impl DealServiceImpl {
    pub fn new(client: Arc<dyn AsyncRecordGateway>) -> Self {
        Self {
            repo: EntityRepository::new(client, DEAL_ENTITY),
        }
    }
}

#[async_trait]
impl DealService for DealServiceImpl {
    async fn get_all(&self) -> Vec<Deal> {
        let query = FetchQuery::with_fields(DEAL_FIELDS);
        policy::list_or_empty(DEAL_ENTITY, "get_all", self.repo.fetch(&query).await)
    }

    async fn get_by_id(&self, id: i64) -> Option<Deal> {
        let query = FetchQuery::with_fields(DEAL_DETAIL_FIELDS);
        policy::record_or_none(DEAL_ENTITY, id, self.repo.get(id, &query).await)
    }

    async fn create(&self, input: &DealInput) -> GatewayResult<Option<Deal>> {
        let payload = DealPayload::for_create(input, Utc::now());
        policy::logged(DEAL_ENTITY, "create", self.repo.create_one(&payload).await)
    }

    async fn update(&self, id: i64, input: &DealInput) -> GatewayResult<Option<Deal>> {
        let payload = DealPayload::for_update(id, input);
        policy::logged(DEAL_ENTITY, "update", self.repo.update_one(&payload).await)
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        policy::logged(DEAL_ENTITY, "delete", self.repo.delete_one(id).await)
    }

    async fn search(&self, query: &str) -> Vec<Deal> {
        if policy::is_blank(query) {
            return self.get_all().await;
        }

        let fetch =
            FetchQuery::with_fields(DEAL_SEARCH_FIELDS).contains_any(DEAL_TEXT_FIELDS, query);
        policy::list_or_empty(DEAL_ENTITY, "search", self.repo.fetch(&fetch).await)
    }

    async fn get_by_stage(&self, stage: &str) -> Vec<Deal> {
        let query = FetchQuery::with_fields(DEAL_STAGE_FIELDS).where_equals("stage_c", stage);
        policy::list_or_empty(DEAL_ENTITY, "get_by_stage", self.repo.fetch(&query).await)
    }
}
