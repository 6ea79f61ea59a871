//! Request and response envelopes exchanged with the record store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response to `fetch_records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Option<Vec<Value>>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Response to `get_record_by_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome for one record inside a batch write or delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Response to `create_record`, `update_record` and `delete_record`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteResponse {
    pub success: bool,

    #[serde(default)]
    pub results: Option<Vec<RecordResult>>,

    #[serde(default)]
    pub message: Option<String>,
}

impl WriteResponse {
    /// First failed record that carries a message, if any.
    pub fn first_failure_message(&self) -> Option<&str> {
        self.results
            .iter()
            .flatten()
            .filter(|r| !r.success)
            .find_map(|r| r.message.as_deref())
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().flatten().filter(|r| !r.success).count()
    }

    /// Data of the first successful record.
    pub fn first_success_data(&self) -> Option<&Value> {
        self.results
            .iter()
            .flatten()
            .filter(|r| r.success)
            .find_map(|r| r.data.as_ref())
    }
}

/// Body for `create_record` and `update_record`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    pub records: Vec<Value>,
}

impl WriteRequest {
    pub fn single(record: Value) -> Self {
        Self {
            records: vec![record],
        }
    }
}

/// Body for `delete_record`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<i64>,
}
