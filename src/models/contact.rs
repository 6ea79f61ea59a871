//! Contact model representing a person in the CRM.

use super::fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage entity name.
pub const CONTACT_ENTITY: &str = "contact_c";

/// Projection used by list and detail reads.
pub const CONTACT_FIELDS: &[&str] = &[
    "Name",
    "email_c",
    "phone_c",
    "company_c",
    "notes_c",
    "Tags",
    "last_contact_date_c",
    "created_at_c",
    "CreatedOn",
    "ModifiedOn",
];

/// Projection used by search.
pub const CONTACT_SEARCH_FIELDS: &[&str] = &[
    "Name",
    "email_c",
    "phone_c",
    "company_c",
    "notes_c",
    "Tags",
    "last_contact_date_c",
    "created_at_c",
];

/// Fields matched by free-text search.
pub const CONTACT_TEXT_FIELDS: &[&str] = &["Name", "email_c", "company_c", "phone_c"];

/// A contact as stored in the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Contact {
    /// Primary key assigned by the store
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "email_c")]
    pub email: Option<String>,

    #[serde(rename = "phone_c")]
    pub phone: Option<String>,

    /// Company name (free text, not a lookup)
    #[serde(rename = "company_c")]
    pub company: Option<String>,

    #[serde(rename = "notes_c")]
    pub notes: Option<String>,

    #[serde(
        rename = "Tags",
        deserialize_with = "fields::deserialize_tags",
        serialize_with = "fields::serialize_tags"
    )]
    pub tags: Vec<String>,

    #[serde(rename = "last_contact_date_c")]
    pub last_contact_date: Option<String>,

    #[serde(rename = "created_at_c")]
    pub created_at: Option<String>,

    #[serde(rename = "CreatedOn")]
    pub created_on: Option<String>,

    #[serde(rename = "ModifiedOn")]
    pub modified_on: Option<String>,
}

/// Caller-supplied contact fields.
///
/// Storage names (`email_c`, `Tags`, ...) are accepted too. When a field
/// arrives under both names, the non-empty caller name wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "ContactInputFields")]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub last_contact_date: Option<String>,
}

/// Both spellings of every [`ContactInput`] field, as they may arrive.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ContactInputFields {
    name: Option<String>,
    #[serde(rename = "Name")]
    name_c: Option<String>,
    email: Option<String>,
    email_c: Option<String>,
    phone: Option<String>,
    phone_c: Option<String>,
    company: Option<String>,
    company_c: Option<String>,
    notes: Option<String>,
    notes_c: Option<String>,
    #[serde(deserialize_with = "fields::deserialize_opt_tags")]
    tags: Option<Vec<String>>,
    #[serde(rename = "Tags", deserialize_with = "fields::deserialize_opt_tags")]
    tags_c: Option<Vec<String>>,
    #[serde(rename = "lastContactDate")]
    last_contact_date: Option<String>,
    last_contact_date_c: Option<String>,
}

impl From<ContactInputFields> for ContactInput {
    fn from(raw: ContactInputFields) -> Self {
        Self {
            name: fields::prefer(raw.name, raw.name_c),
            email: fields::prefer(raw.email, raw.email_c),
            phone: fields::prefer(raw.phone, raw.phone_c),
            company: fields::prefer(raw.company, raw.company_c),
            notes: fields::prefer(raw.notes, raw.notes_c),
            tags: fields::prefer_tags(raw.tags, raw.tags_c),
            last_contact_date: fields::prefer(raw.last_contact_date, raw.last_contact_date_c),
        }
    }
}

/// Write record submitted to the store.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ContactPayload {
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "email_c", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "phone_c", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "company_c", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(rename = "notes_c", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(rename = "Tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    #[serde(rename = "last_contact_date_c", skip_serializing_if = "Option::is_none")]
    pub last_contact_date: Option<String>,

    #[serde(rename = "created_at_c", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ContactPayload {
    fn from_input(input: &ContactInput) -> Self {
        Self {
            id: None,
            name: fields::non_empty(&input.name),
            email: fields::non_empty(&input.email),
            phone: fields::non_empty(&input.phone),
            company: fields::non_empty(&input.company),
            notes: fields::non_empty(&input.notes),
            tags: input.tags.as_deref().and_then(fields::join_tags),
            last_contact_date: fields::non_empty(&input.last_contact_date),
            created_at: None,
        }
    }

    /// Payload for a new contact, stamped with its creation time.
    pub fn for_create(input: &ContactInput, now: DateTime<Utc>) -> Self {
        Self {
            created_at: Some(fields::iso_timestamp(now)),
            ..Self::from_input(input)
        }
    }

    pub fn for_update(id: i64, input: &ContactInput) -> Self {
        Self {
            id: Some(id),
            ..Self::from_input(input)
        }
    }
}
