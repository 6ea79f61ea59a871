//! Company service layer.
//!
//! CRUD and search over companies, plus per-company aggregates computed from
//! the contacts and deals that name the company.

use super::policy;
use crate::client::{AsyncRecordGateway, FetchQuery};
use crate::error::GatewayResult;
use crate::models::company::{
    COMPANY_ENTITY, COMPANY_FIELDS, COMPANY_SEARCH_FIELDS, COMPANY_TEXT_FIELDS,
};
use crate::models::contact::CONTACT_ENTITY;
use crate::models::deal::DEAL_ENTITY;
use crate::models::{Company, CompanyInput, CompanyPayload, CompanySummary, Contact, Deal};
use crate::repositories::EntityRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Company service trait for business operations.
#[async_trait]
pub trait CompanyService: Send + Sync {
    async fn get_all(&self) -> Vec<Company>;

    async fn get_by_id(&self, id: i64) -> Option<Company>;

    async fn create(&self, input: &CompanyInput) -> GatewayResult<Option<Company>>;

    async fn update(&self, id: i64, input: &CompanyInput) -> GatewayResult<Option<Company>>;

    /// Delete a company. Returns `false` instead of an error when the store
    /// refuses or cannot be reached.
    async fn delete(&self, id: i64) -> bool;

    async fn search(&self, query: &str) -> Vec<Company>;

    /// Number of contacts whose company field names this company.
    async fn get_contact_count(&self, company_id: i64) -> usize;

    /// Sum of the values of deals whose company field names this company.
    async fn get_total_deal_value(&self, company_id: i64) -> f64;

    /// Both aggregates, fetched concurrently.
    async fn get_summary(&self, company_id: i64) -> CompanySummary;
}

/// Default implementation of CompanyService.
pub struct CompanyServiceImpl {
    companies: EntityRepository,
    contacts: EntityRepository,
    deals: EntityRepository,
}

impl CompanyServiceImpl {
    /// Create a new company service.
    pub fn new(client: Arc<dyn AsyncRecordGateway>) -> Self {
        Self {
            companies: EntityRepository::new(client.clone(), COMPANY_ENTITY),
            contacts: EntityRepository::new(client.clone(), CONTACT_ENTITY),
            deals: EntityRepository::new(client, DEAL_ENTITY),
        }
    }

    /// Name the company is referred to by in contacts and deals.
    async fn company_name(&self, company_id: i64) -> Option<String> {
        let name = self
            .get_by_id(company_id)
            .await
            .and_then(|company| company.name)
            .filter(|name| !name.is_empty());

        if name.is_none() {
            tracing::warn!(company_id, "Company not found or unnamed, aggregates are zero");
        }
        name
    }

    async fn count_contacts_named(&self, company: &str) -> usize {
        let query = FetchQuery::with_fields(&["Name", "company_c"]).where_equals("company_c", company);
        let contacts: Vec<Contact> = policy::list_or_empty(
            CONTACT_ENTITY,
            "contact_count",
            self.contacts.fetch(&query).await,
        );
        contacts.len()
    }

    async fn sum_deals_named(&self, company: &str) -> f64 {
        let query = FetchQuery::with_fields(&["Name", "company_c", "value_c"])
            .where_equals("company_c", company);
        let deals: Vec<Deal> =
            policy::list_or_empty(DEAL_ENTITY, "total_deal_value", self.deals.fetch(&query).await);
        deals.iter().filter_map(|deal| deal.value).sum()
    }
}

#[async_trait]
impl CompanyService for CompanyServiceImpl {
    async fn get_all(&self) -> Vec<Company> {
        let query = FetchQuery::with_fields(COMPANY_FIELDS);
        policy::list_or_empty(COMPANY_ENTITY, "get_all", self.companies.fetch(&query).await)
    }

    async fn get_by_id(&self, id: i64) -> Option<Company> {
        let query = FetchQuery::with_fields(COMPANY_FIELDS);
        policy::record_or_none(COMPANY_ENTITY, id, self.companies.get(id, &query).await)
    }

    async fn create(&self, input: &CompanyInput) -> GatewayResult<Option<Company>> {
        let payload = CompanyPayload::for_create(input, Utc::now());
        policy::logged(COMPANY_ENTITY, "create", self.companies.create_one(&payload).await)
    }

    async fn update(&self, id: i64, input: &CompanyInput) -> GatewayResult<Option<Company>> {
        let payload = CompanyPayload::for_update(id, input);
        policy::logged(COMPANY_ENTITY, "update", self.companies.update_one(&payload).await)
    }

    async fn delete(&self, id: i64) -> bool {
        match self.companies.delete_one(id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(id, error = %e, "Error deleting company");
                false
            }
        }
    }

    async fn search(&self, query: &str) -> Vec<Company> {
        if policy::is_blank(query) {
            return self.get_all().await;
        }

        let fetch = FetchQuery::with_fields(COMPANY_SEARCH_FIELDS)
            .contains_any(COMPANY_TEXT_FIELDS, query);
        policy::list_or_empty(COMPANY_ENTITY, "search", self.companies.fetch(&fetch).await)
    }

    async fn get_contact_count(&self, company_id: i64) -> usize {
        match self.company_name(company_id).await {
            Some(name) => self.count_contacts_named(&name).await,
            None => 0,
        }
    }

    async fn get_total_deal_value(&self, company_id: i64) -> f64 {
        match self.company_name(company_id).await {
            Some(name) => self.sum_deals_named(&name).await,
            None => 0.0,
        }
    }

    async fn get_summary(&self, company_id: i64) -> CompanySummary {
        let Some(name) = self.company_name(company_id).await else {
            return CompanySummary::default();
        };

        let (contact_count, total_deal_value) = futures::join!(
            self.count_contacts_named(&name),
            self.sum_deals_named(&name)
        );

        CompanySummary {
            contact_count,
            total_deal_value,
        }
    }
}
