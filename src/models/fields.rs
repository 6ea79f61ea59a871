//! Serde helpers shared by the record models.
//!
//! The store is loose about value shapes: tags arrive as a comma-separated
//! string or an array, lookup fields as a bare id or an `{Id, Name}` object,
//! numbers sometimes as strings. These helpers accept all of them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Format a timestamp the way the store expects (`2024-01-15T09:00:00.000Z`).
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar date part of a timestamp (`2024-01-15`).
pub fn iso_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// The value unless it is absent or empty.
pub fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Resolve a text field sent under both its caller name and its storage name.
///
/// The caller name wins unless it is absent or empty.
pub fn prefer(canonical: Option<String>, storage: Option<String>) -> Option<String> {
    canonical.filter(|s| !s.is_empty()).or(storage)
}

/// Like [`prefer`] for ids and numbers: the caller name wins when present.
pub fn prefer_some<T>(canonical: Option<T>, storage: Option<T>) -> Option<T> {
    canonical.or(storage)
}

/// Like [`prefer`] for tag lists: an empty list defers to the storage name.
pub fn prefer_tags(
    canonical: Option<Vec<String>>,
    storage: Option<Vec<String>>,
) -> Option<Vec<String>> {
    canonical.filter(|tags| !tags.is_empty()).or(storage)
}

/// Split a stored tag string into its parts.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags into the stored comma-separated form. `None` for no tags.
pub fn join_tags(tags: &[String]) -> Option<String> {
    let joined = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn tags_from_value(value: Value) -> Vec<String> {
    match value {
        Value::String(s) => split_tags(&s),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                _ => None,
            })
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(tags_from_value(value))
}

pub fn deserialize_opt_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(tags_from_value(value)))
}

pub fn serialize_tags<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match join_tags(tags) {
        Some(joined) => serializer.serialize_str(&joined),
        None => serializer.serialize_none(),
    }
}

fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
        Value::Object(map) => map.get("Id").and_then(int_from_value),
        _ => None,
    }
}

/// Lookup field: an id, a numeric string, or an `{ "Id": .., "Name": .. }` object.
pub fn deserialize_lookup_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value))
}

/// Integer that may arrive as a string. Unparseable values become `None`.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => None,
        other => int_from_value(&other),
    })
}

/// Float that may arrive as a string. Unparseable values become `None`.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
