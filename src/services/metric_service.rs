//! Dashboard metric service (read-only).

use super::policy;
use crate::client::{AsyncRecordGateway, FetchQuery};
use crate::models::metric::{DASHBOARD_METRIC_FIELDS, METRIC_ENTITY, METRIC_FIELDS};
use crate::models::Metric;
use crate::repositories::EntityRepository;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait MetricService: Send + Sync {
    async fn get_all(&self) -> Vec<Metric>;

    /// Metrics shown on the dashboard.
    async fn get_dashboard_metrics(&self) -> Vec<Metric>;
}

pub struct MetricServiceImpl {
    repo: EntityRepository,
}

impl MetricServiceImpl {
    pub fn new(client: Arc<dyn AsyncRecordGateway>) -> Self {
        Self {
            repo: EntityRepository::new(client, METRIC_ENTITY),
        }
    }
}

#[async_trait]
impl MetricService for MetricServiceImpl {
    async fn get_all(&self) -> Vec<Metric> {
        let query = FetchQuery::with_fields(METRIC_FIELDS);
        policy::list_or_empty(METRIC_ENTITY, "get_all", self.repo.fetch(&query).await)
    }

    async fn get_dashboard_metrics(&self) -> Vec<Metric> {
        let query = FetchQuery::with_fields(DASHBOARD_METRIC_FIELDS);
        policy::list_or_empty(
            METRIC_ENTITY,
            "get_dashboard_metrics",
            self.repo.fetch(&query).await,
        )
    }
}
