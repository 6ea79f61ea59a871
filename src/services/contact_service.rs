//! Contact service layer.
//!
//! CRUD and free-text search over contacts.

use super::policy;
use crate::client::{AsyncRecordGateway, FetchQuery};
use crate::error::GatewayResult;
use crate::models::contact::{
    CONTACT_ENTITY, CONTACT_FIELDS, CONTACT_SEARCH_FIELDS, CONTACT_TEXT_FIELDS,
};
use crate::models::{Contact, ContactInput, ContactPayload};
use crate::repositories::EntityRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All contacts; empty when the store cannot be read.
    async fn get_all(&self) -> Vec<Contact>;

    /// One contact, or `None` when missing or unreadable.
    async fn get_by_id(&self, id: i64) -> Option<Contact>;

    async fn create(&self, input: &ContactInput) -> GatewayResult<Option<Contact>>;

    async fn update(&self, id: i64, input: &ContactInput) -> GatewayResult<Option<Contact>>;

    async fn delete(&self, id: i64) -> GatewayResult<()>;

    /// Contacts whose name, email, company or phone contains `query`.
    ///
    /// A blank query returns the same as [`ContactService::get_all`].
    async fn search(&self, query: &str) -> Vec<Contact>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repo: EntityRepository,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(client: Arc<dyn AsyncRecordGateway>) -> Self {
        Self {
            repo: EntityRepository::new(client, CONTACT_ENTITY),
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn get_all(&self) -> Vec<Contact> {
        let query = FetchQuery::with_fields(CONTACT_FIELDS);
        policy::list_or_empty(CONTACT_ENTITY, "get_all", self.repo.fetch(&query).await)
    }

    async fn get_by_id(&self, id: i64) -> Option<Contact> {
        let query = FetchQuery::with_fields(CONTACT_FIELDS);
        policy::record_or_none(CONTACT_ENTITY, id, self.repo.get(id, &query).await)
    }

    async fn create(&self, input: &ContactInput) -> GatewayResult<Option<Contact>> {
        let payload = ContactPayload::for_create(input, Utc::now());
        policy::logged(CONTACT_ENTITY, "create", self.repo.create_one(&payload).await)
    }

    async fn update(&self, id: i64, input: &ContactInput) -> GatewayResult<Option<Contact>> {
        let payload = ContactPayload::for_update(id, input);
        policy::logged(CONTACT_ENTITY, "update", self.repo.update_one(&payload).await)
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        policy::logged(CONTACT_ENTITY, "delete", self.repo.delete_one(id).await)
    }

    async fn search(&self, query: &str) -> Vec<Contact> {
        if policy::is_blank(query) {
            return self.get_all().await;
        }

        let fetch = FetchQuery::with_fields(CONTACT_SEARCH_FIELDS)
            .contains_any(CONTACT_TEXT_FIELDS, query);
        policy::list_or_empty(CONTACT_ENTITY, "search", self.repo.fetch(&fetch).await)
    }
}
