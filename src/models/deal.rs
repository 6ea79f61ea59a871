//! Deal model.

use super::fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEAL_ENTITY: &str = "deal_c";

/// Stage assigned to new deals when none is given.
pub const DEFAULT_DEAL_STAGE: &str = "Lead";

pub const DEAL_FIELDS: &[&str] = &[
    "Name",
    "company_c",
    "value_c",
    "stage_c",
    "expected_close_date_c",
    "created_at_c",
    "Tags",
    "CreatedOn",
    "ModifiedOn",
];

pub const DEAL_DETAIL_FIELDS: &[&str] = &[
    "Name",
    "company_c",
    "value_c",
    "stage_c",
    "expected_close_date_c",
    "created_at_c",
    "Tags",
];

pub const DEAL_SEARCH_FIELDS: &[&str] = &["Name", "company_c", "value_c", "stage_c"];

pub const DEAL_STAGE_FIELDS: &[&str] = &[
    "Name",
    "company_c",
    "value_c",
    "stage_c",
    "expected_close_date_c",
];

pub const DEAL_TEXT_FIELDS: &[&str] = &["Name", "company_c", "stage_c"];

/// A deal as stored in the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Deal {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    /// Company name (free text)
    #[serde(rename = "company_c")]
    pub company: Option<String>,

    #[serde(rename = "value_c", deserialize_with = "fields::deserialize_lenient_f64")]
    pub value: Option<f64>,

    #[serde(rename = "stage_c")]
    pub stage: Option<String>,

    #[serde(rename = "expected_close_date_c")]
    pub expected_close_date: Option<String>,

    #[serde(rename = "created_at_c")]
    pub created_at: Option<String>,

    #[serde(
        rename = "Tags",
        deserialize_with = "fields::deserialize_tags",
        serialize_with = "fields::serialize_tags"
    )]
    pub tags: Vec<String>,

    #[serde(rename = "CreatedOn")]
    pub created_on: Option<String>,

    #[serde(rename = "ModifiedOn")]
    pub modified_on: Option<String>,
}

/// Caller-supplied deal fields. Storage names are accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "DealInputFields")]
pub struct DealInput {
    pub name: Option<String>,
    pub company: Option<String>,
    pub value: Option<f64>,
    pub stage: Option<String>,
    pub expected_close_date: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DealInputFields {
    name: Option<String>,
    #[serde(rename = "Name")]
    name_c: Option<String>,
    company: Option<String>,
    company_c: Option<String>,
    #[serde(deserialize_with = "fields::deserialize_lenient_f64")]
    value: Option<f64>,
    #[serde(deserialize_with = "fields::deserialize_lenient_f64")]
    value_c: Option<f64>,
    stage: Option<String>,
    stage_c: Option<String>,
    #[serde(rename = "expectedCloseDate")]
    expected_close_date: Option<String>,
    expected_close_date_c: Option<String>,
}

impl From<DealInputFields> for DealInput {
    fn from(raw: DealInputFields) -> Self {
        Self {
            name: fields::prefer(raw.name, raw.name_c),
            company: fields::prefer(raw.company, raw.company_c),
            value: fields::prefer_some(raw.value, raw.value_c),
            stage: fields::prefer(raw.stage, raw.stage_c),
            expected_close_date: fields::prefer(raw.expected_close_date, raw.expected_close_date_c),
        }
    }
}

/// Write record submitted to the store.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct DealPayload {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "company_c", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Always sent; missing input counts as zero
    #[serde(rename = "value_c")]
    pub value: f64,

    #[serde(rename = "stage_c", skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    #[serde(rename = "expected_close_date_c", skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<String>,

    #[serde(rename = "created_at_c", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl DealPayload {
    fn from_input(input: &DealInput) -> Self {
        Self {
            id: None,
            name: fields::non_empty(&input.name),
            company: fields::non_empty(&input.company),
            value: input.value.unwrap_or(0.0),
            stage: fields::non_empty(&input.stage),
            expected_close_date: fields::non_empty(&input.expected_close_date),
            created_at: None,
        }
    }

    /// Payload for a new deal: stage defaults to "Lead", creation time is stamped.
    pub fn for_create(input: &DealInput, now: DateTime<Utc>) -> Self {
        let mut payload = Self::from_input(input);
        payload.stage = payload
            .stage
            .or_else(|| Some(DEFAULT_DEAL_STAGE.to_string()));
        payload.created_at = Some(fields::iso_timestamp(now));
        payload
    }

    pub fn for_update(id: i64, input: &DealInput) -> Self {
        Self {
            id: Some(id),
            ..Self::from_input(input)
        }
    }
}
