//! Application service layer.
//!
//! One service per entity, each a trait plus a default implementation built
//! on an [`AsyncRecordGateway`](crate::client::AsyncRecordGateway). Reads
//! degrade to empty results on failure; writes return the error.

mod activity_service;
mod company_service;
mod contact_service;
mod deal_service;
mod metric_service;
mod policy;
mod task_store;

pub use activity_service::{ActivityService, ActivityServiceImpl, DEFAULT_RECENT_LIMIT};
pub use company_service::{CompanyService, CompanyServiceImpl};
pub use contact_service::{ContactService, ContactServiceImpl};
pub use deal_service::{DealService, DealServiceImpl};
pub use metric_service::{MetricService, MetricServiceImpl};
pub use task_store::TaskStore;

use crate::client::{AsyncRecordClient, AsyncRecordGateway, RecordClient};
use crate::config::Config;
use std::sync::Arc;

/// All services wired to one gateway and one task store.
pub struct Services {
    pub contacts: Arc<dyn ContactService>,
    pub companies: Arc<dyn CompanyService>,
    pub deals: Arc<dyn DealService>,
    pub activities: Arc<dyn ActivityService>,
    pub metrics: Arc<dyn MetricService>,
}

impl Services {
    /// Connect to the record store described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let client = AsyncRecordClient::new(RecordClient::new(config));
        Self::new(Arc::new(client), config)
    }

    pub fn new(client: Arc<dyn AsyncRecordGateway>, config: &Config) -> Self {
        let tasks = Arc::new(TaskStore::new());
        let activities = ActivityServiceImpl::new(client.clone(), tasks)
            .with_recent_limit(config.recent_activity_limit);

        Self {
            contacts: Arc::new(ContactServiceImpl::new(client.clone())),
            companies: Arc::new(CompanyServiceImpl::new(client.clone())),
            deals: Arc::new(DealServiceImpl::new(client.clone())),
            activities: Arc::new(activities),
            metrics: Arc::new(MetricServiceImpl::new(client)),
        }
    }
}
