//! Company model.

use super::fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const COMPANY_ENTITY: &str = "company_c";

pub const COMPANY_FIELDS: &[&str] = &[
    "Name",
    "industry_c",
    "website_c",
    "address_c",
    "phone_c",
    "email_c",
    "employees_c",
    "revenue_c",
    "founded_c",
    "description_c",
    "Tags",
];

pub const COMPANY_SEARCH_FIELDS: &[&str] = &["Name", "industry_c", "website_c", "description_c"];

pub const COMPANY_TEXT_FIELDS: &[&str] = &["Name", "industry_c", "website_c", "description_c"];

/// A company as stored in the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Company {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "industry_c")]
    pub industry: Option<String>,

    #[serde(rename = "website_c")]
    pub website: Option<String>,

    #[serde(rename = "address_c")]
    pub address: Option<String>,

    #[serde(rename = "phone_c")]
    pub phone: Option<String>,

    #[serde(rename = "email_c")]
    pub email: Option<String>,

    #[serde(rename = "employees_c", deserialize_with = "fields::deserialize_lenient_i64")]
    pub employee_count: Option<i64>,

    #[serde(rename = "revenue_c", deserialize_with = "fields::deserialize_lenient_f64")]
    pub revenue: Option<f64>,

    /// Founding date (`YYYY-MM-DD`)
    #[serde(rename = "founded_c")]
    pub founded: Option<String>,

    #[serde(rename = "description_c")]
    pub description: Option<String>,

    #[serde(
        rename = "Tags",
        deserialize_with = "fields::deserialize_tags",
        serialize_with = "fields::serialize_tags"
    )]
    pub tags: Vec<String>,
}

/// Caller-supplied company fields. Storage names are accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "CompanyInputFields")]
pub struct CompanyInput {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub employees: Option<i64>,
    pub revenue: Option<f64>,
    pub founded: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CompanyInputFields {
    name: Option<String>,
    #[serde(rename = "Name")]
    name_c: Option<String>,
    industry: Option<String>,
    industry_c: Option<String>,
    website: Option<String>,
    website_c: Option<String>,
    address: Option<String>,
    address_c: Option<String>,
    phone: Option<String>,
    phone_c: Option<String>,
    email: Option<String>,
    email_c: Option<String>,
    #[serde(deserialize_with = "fields::deserialize_lenient_i64")]
    employees: Option<i64>,
    #[serde(deserialize_with = "fields::deserialize_lenient_i64")]
    employees_c: Option<i64>,
    #[serde(deserialize_with = "fields::deserialize_lenient_f64")]
    revenue: Option<f64>,
    #[serde(deserialize_with = "fields::deserialize_lenient_f64")]
    revenue_c: Option<f64>,
    founded: Option<String>,
    founded_c: Option<String>,
    description: Option<String>,
    description_c: Option<String>,
}

impl From<CompanyInputFields> for CompanyInput {
    fn from(raw: CompanyInputFields) -> Self {
        Self {
            name: fields::prefer(raw.name, raw.name_c),
            industry: fields::prefer(raw.industry, raw.industry_c),
            website: fields::prefer(raw.website, raw.website_c),
            address: fields::prefer(raw.address, raw.address_c),
            phone: fields::prefer(raw.phone, raw.phone_c),
            email: fields::prefer(raw.email, raw.email_c),
            employees: fields::prefer_some(raw.employees, raw.employees_c),
            revenue: fields::prefer_some(raw.revenue, raw.revenue_c),
            founded: fields::prefer(raw.founded, raw.founded_c),
            description: fields::prefer(raw.description, raw.description_c),
        }
    }
}

/// Write record submitted to the store.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct CompanyPayload {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "industry_c", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    #[serde(rename = "website_c", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(rename = "address_c", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "phone_c", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "email_c", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Always sent; missing input counts as zero
    #[serde(rename = "employees_c")]
    pub employees: i64,

    /// Always sent; missing input counts as zero
    #[serde(rename = "revenue_c")]
    pub revenue: f64,

    #[serde(rename = "founded_c", skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,

    #[serde(rename = "description_c", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompanyPayload {
    fn from_input(input: &CompanyInput) -> Self {
        Self {
            id: None,
            name: fields::non_empty(&input.name),
            industry: fields::non_empty(&input.industry),
            website: fields::non_empty(&input.website),
            address: fields::non_empty(&input.address),
            phone: fields::non_empty(&input.phone),
            email: fields::non_empty(&input.email),
            employees: input.employees.unwrap_or(0),
            revenue: input.revenue.unwrap_or(0.0),
            founded: fields::non_empty(&input.founded),
            description: fields::non_empty(&input.description),
        }
    }

    /// Payload for a new company. The founding date defaults to today.
    pub fn for_create(input: &CompanyInput, now: DateTime<Utc>) -> Self {
        let mut payload = Self::from_input(input);
        if payload.founded.is_none() {
            payload.founded = Some(fields::iso_date(now));
        }
        payload
    }

    pub fn for_update(id: i64, input: &CompanyInput) -> Self {
        Self {
            id: Some(id),
            ..Self::from_input(input)
        }
    }
}

/// Aggregates computed for one company.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub contact_count: usize,
    pub total_deal_value: f64,
}
