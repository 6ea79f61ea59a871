//! Activity model: a logged interaction with a contact.

use super::fields;
use super::task::{CompletionData, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ACTIVITY_ENTITY: &str = "activity_c";

/// Name used when an activity has neither a description nor a name.
pub const DEFAULT_ACTIVITY_NAME: &str = "Activity";

pub const ACTIVITY_FIELDS: &[&str] = &[
    "Name",
    "contact_id_c",
    "type_c",
    "description_c",
    "date_c",
    "outcome_c",
    "next_steps_c",
    "Tags",
];

/// Projection for per-contact and recent listings.
pub const ACTIVITY_TIMELINE_FIELDS: &[&str] = &[
    "Name",
    "contact_id_c",
    "type_c",
    "description_c",
    "date_c",
    "outcome_c",
    "next_steps_c",
];

pub const ACTIVITY_SEARCH_FIELDS: &[&str] = &[
    "Name",
    "type_c",
    "description_c",
    "outcome_c",
    "next_steps_c",
];

pub const ACTIVITY_TEXT_FIELDS: &[&str] = &["description_c", "outcome_c", "next_steps_c", "type_c"];

/// An activity as stored in the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Activity {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    /// Contact lookup
    #[serde(rename = "contact_id_c", deserialize_with = "fields::deserialize_lookup_id")]
    pub contact_id: Option<i64>,

    /// Kind of interaction (call, email, meeting, ...)
    #[serde(rename = "type_c")]
    pub activity_type: Option<String>,

    #[serde(rename = "description_c")]
    pub description: Option<String>,

    #[serde(rename = "date_c")]
    pub date: Option<String>,

    #[serde(rename = "outcome_c")]
    pub outcome: Option<String>,

    #[serde(rename = "next_steps_c")]
    pub next_steps: Option<String>,

    #[serde(
        rename = "Tags",
        deserialize_with = "fields::deserialize_tags",
        serialize_with = "fields::serialize_tags"
    )]
    pub tags: Vec<String>,
}

/// Caller-supplied activity fields. Storage names are accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "ActivityInputFields")]
pub struct ActivityInput {
    pub name: Option<String>,
    pub contact_id: Option<i64>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub description: Option<String>,
    pub outcome: Option<String>,
    pub next_steps: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ActivityInputFields {
    name: Option<String>,
    #[serde(rename = "Name")]
    name_c: Option<String>,
    #[serde(rename = "contactId", deserialize_with = "fields::deserialize_lookup_id")]
    contact_id: Option<i64>,
    #[serde(deserialize_with = "fields::deserialize_lookup_id")]
    contact_id_c: Option<i64>,
    #[serde(rename = "type")]
    activity_type: Option<String>,
    type_c: Option<String>,
    description: Option<String>,
    description_c: Option<String>,
    outcome: Option<String>,
    outcome_c: Option<String>,
    #[serde(rename = "nextSteps")]
    next_steps: Option<String>,
    next_steps_c: Option<String>,
}

impl From<ActivityInputFields> for ActivityInput {
    fn from(raw: ActivityInputFields) -> Self {
        Self {
            name: fields::prefer(raw.name, raw.name_c),
            contact_id: fields::prefer_some(raw.contact_id, raw.contact_id_c),
            activity_type: fields::prefer(raw.activity_type, raw.type_c),
            description: fields::prefer(raw.description, raw.description_c),
            outcome: fields::prefer(raw.outcome, raw.outcome_c),
            next_steps: fields::prefer(raw.next_steps, raw.next_steps_c),
        }
    }
}

/// Write record submitted to the store.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityPayload {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "contact_id_c", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,

    #[serde(rename = "type_c", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,

    #[serde(rename = "description_c", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "date_c")]
    pub date: String,

    #[serde(rename = "outcome_c", skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    #[serde(rename = "next_steps_c", skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
}

impl ActivityPayload {
    /// Payload for a new activity dated `now`.
    ///
    /// The description doubles as the name. Without one the name is used,
    /// then "Activity".
    pub fn for_create(input: &ActivityInput, now: DateTime<Utc>) -> Self {
        let description = fields::non_empty(&input.description);
        let name = description
            .clone()
            .or_else(|| fields::non_empty(&input.name))
            .unwrap_or_else(|| DEFAULT_ACTIVITY_NAME.to_string());

        Self {
            name,
            contact_id: input.contact_id,
            activity_type: fields::non_empty(&input.activity_type),
            description,
            date: fields::iso_timestamp(now),
            outcome: fields::non_empty(&input.outcome),
            next_steps: fields::non_empty(&input.next_steps),
        }
    }

    /// Payload logging a completed task. The task title is the name.
    pub fn for_task(task: &Task, completion: &CompletionData, now: DateTime<Utc>) -> Self {
        Self {
            name: task.title.clone(),
            contact_id: Some(task.contact_id),
            activity_type: Some(task.task_type.clone()).filter(|t| !t.is_empty()),
            description: fields::non_empty(&task.description),
            date: fields::iso_timestamp(now),
            outcome: fields::non_empty(&completion.outcome),
            next_steps: fields::non_empty(&completion.next_steps),
        }
    }
}
