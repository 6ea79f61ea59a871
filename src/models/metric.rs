//! Dashboard metric model (read-only).

use serde::{Deserialize, Serialize};

pub const METRIC_ENTITY: &str = "metric_c";

pub const METRIC_FIELDS: &[&str] = &["Name", "label_c", "value_c", "change_c", "trend_c", "Tags"];

pub const DASHBOARD_METRIC_FIELDS: &[&str] = &["Name", "label_c", "value_c", "change_c", "trend_c"];

/// A metric figure, stored either as a number or as preformatted text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// An aggregate figure shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Metric {
    #[serde(rename = "Id")]
    pub id: i64,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "label_c")]
    pub label: Option<String>,

    #[serde(rename = "value_c")]
    pub value: Option<MetricValue>,

    #[serde(rename = "change_c")]
    pub change: Option<MetricValue>,

    /// Direction of change ("up", "down", ...)
    #[serde(rename = "trend_c")]
    pub trend: Option<String>,
}
