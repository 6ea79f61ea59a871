use async_trait::async_trait;
use crm_services::client::query::{GroupOperator, Operator};
use crm_services::client::{
    AsyncRecordGateway, DeleteRequest, FetchQuery, FetchResponse, RecordResponse, RecordResult,
    SortType, WriteRequest, WriteResponse,
};
use crm_services::error::{GatewayError, GatewayResult};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// How an entity misbehaves once a failure is injected.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Failure {
    /// The request never reaches the store.
    Transport,
    /// The store answers with `success: false`.
    Rejected(Option<String>),
    /// Writes succeed as a batch but the record itself fails.
    RecordFailed(Option<String>),
}

/// In-memory record store for testing.
///
/// Tables keep insertion order and understand enough of the query shape
/// (equality filters, contains groups, ordering, paging) to exercise the
/// services end to end. Calls and fetch queries are recorded for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockRecordGateway {
    tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    next_id: Arc<Mutex<i64>>,
    failures: Arc<Mutex<HashMap<String, Failure>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    queries: Arc<Mutex<Vec<(String, FetchQuery)>>>,
    writes: Arc<Mutex<Vec<(String, Value)>>>,
}

#[allow(dead_code)]
impl MockRecordGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, assigning an `Id` when it has none. Returns the id.
    pub fn insert(&self, entity: &str, record: Value) -> i64 {
        let mut record = record;
        let id = match record.get("Id").and_then(Value::as_i64) {
            Some(id) => {
                let mut next = self.next_id.lock().unwrap();
                *next = (*next).max(id);
                id
            }
            None => {
                let id = self.assign_id();
                record["Id"] = Value::from(id);
                id
            }
        };

        self.tables
            .lock()
            .unwrap()
            .entry(entity.to_string())
            .or_default()
            .push(record);
        id
    }

    pub fn records(&self, entity: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(entity)
            .cloned()
            .unwrap_or_default()
    }

    pub fn record(&self, entity: &str, id: i64) -> Option<Value> {
        self.records(entity).into_iter().find(|r| record_id(r) == Some(id))
    }

    /// Make every call for `entity` fail in the given way.
    pub fn fail(&self, entity: &str, failure: Failure) {
        self.failures
            .lock()
            .unwrap()
            .insert(entity.to_string(), failure);
    }

    pub fn heal(&self, entity: &str) {
        self.failures.lock().unwrap().remove(entity);
    }

    /// Number of calls to `method` for `entity`, e.g. `("fetch_records", "contact_c")`.
    pub fn get_call_count(&self, method: &str, entity: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(&format!("{}:{}", method, entity)).unwrap_or(&0)
    }

    /// The most recent fetch query sent for `entity`.
    pub fn last_query(&self, entity: &str) -> Option<FetchQuery> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == entity)
            .map(|(_, q)| q.clone())
    }

    /// The most recent record submitted for create or update on `entity`.
    pub fn last_write(&self, entity: &str) -> Option<Value> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == entity)
            .map(|(_, v)| v.clone())
    }

    fn assign_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }

    fn track_call(&self, method: &str, entity: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(format!("{}:{}", method, entity)).or_insert(0) += 1;
    }

    fn failure(&self, entity: &str) -> Option<Failure> {
        self.failures.lock().unwrap().get(entity).cloned()
    }

    fn transport_error() -> GatewayError {
        GatewayError::HttpError("connection refused".to_string())
    }

    /// Failure applied to a read; record-level failures read as rejections.
    fn read_failure(&self, entity: &str) -> GatewayResult<Option<Option<String>>> {
        match self.failure(entity) {
            None => Ok(None),
            Some(Failure::Transport) => Err(Self::transport_error()),
            Some(Failure::Rejected(message)) | Some(Failure::RecordFailed(message)) => {
                Ok(Some(message))
            }
        }
    }

    /// Failure applied to a write, as the response to send instead.
    fn write_failure(&self, entity: &str) -> GatewayResult<Option<WriteResponse>> {
        match self.failure(entity) {
            None => Ok(None),
            Some(Failure::Transport) => Err(Self::transport_error()),
            Some(Failure::Rejected(message)) => Ok(Some(WriteResponse {
                success: false,
                results: None,
                message,
            })),
            Some(Failure::RecordFailed(message)) => Ok(Some(WriteResponse {
                success: true,
                results: Some(vec![RecordResult {
                    success: false,
                    data: None,
                    message,
                }]),
                message: None,
            })),
        }
    }
}

fn record_id(record: &Value) -> Option<i64> {
    record.get("Id").and_then(Value::as_i64)
}

/// Lookup fields may hold `{ "Id": n }` instead of the bare id.
fn comparable(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("Id").unwrap_or(value),
        _ => value,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_lowercase(),
        Value::Null => String::new(),
        other => other.to_string().to_lowercase(),
    }
}

fn matches_query(record: &Value, query: &FetchQuery) -> bool {
    let filters_match = query.filters.iter().all(|condition| {
        let field = record.get(&condition.field_name).map(comparable);
        let hit = match condition.operator {
            Operator::EqualTo => condition.values.iter().any(|v| field == Some(v)),
            Operator::Contains => condition.values.iter().any(|v| {
                field.map(text_of).unwrap_or_default().contains(&text_of(v))
            }),
        };
        hit == condition.include
    });

    let groups_match = query.where_groups.iter().all(|group| {
        let mut sub_results = group.sub_groups.iter().map(|sub| {
            let mut hits = sub.conditions.iter().map(|c| {
                let field = record.get(&c.field_name).map(text_of).unwrap_or_default();
                c.values.iter().any(|v| field.contains(&text_of(v)))
            });
            match sub.operator {
                GroupOperator::Or => hits.any(|h| h),
                GroupOperator::And => hits.all(|h| h),
            }
        });
        match group.operator {
            GroupOperator::Or => sub_results.any(|h| h),
            GroupOperator::And => sub_results.all(|h| h),
        }
    });

    filters_match && groups_match
}

fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (x, y) => text_of(x.unwrap_or(&Value::Null)).cmp(&text_of(y.unwrap_or(&Value::Null))),
    }
}

#[async_trait]
impl AsyncRecordGateway for MockRecordGateway {
    async fn fetch_records(&self, entity: &str, query: &FetchQuery) -> GatewayResult<FetchResponse> {
        self.track_call("fetch_records", entity);
        self.queries
            .lock()
            .unwrap()
            .push((entity.to_string(), query.clone()));

        if let Some(message) = self.read_failure(entity)? {
            return Ok(FetchResponse {
                success: false,
                data: None,
                message,
            });
        }

        let mut records: Vec<Value> = self
            .records(entity)
            .into_iter()
            .filter(|r| matches_query(r, query))
            .collect();

        for order in query.order_by.iter().rev() {
            records.sort_by(|a, b| {
                let ordering = compare_field(a, b, &order.field_name);
                match order.sorttype {
                    SortType::Asc => ordering,
                    SortType::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(paging) = query.paging_info {
            records = records
                .into_iter()
                .skip(paging.offset)
                .take(paging.limit)
                .collect();
        }

        Ok(FetchResponse {
            success: true,
            data: Some(records),
            message: None,
        })
    }

    async fn get_record_by_id(
        &self,
        entity: &str,
        id: i64,
        query: &FetchQuery,
    ) -> GatewayResult<RecordResponse> {
        self.track_call("get_record_by_id", entity);
        self.queries
            .lock()
            .unwrap()
            .push((entity.to_string(), query.clone()));

        if let Some(message) = self.read_failure(entity)? {
            return Ok(RecordResponse {
                success: false,
                data: None,
                message,
            });
        }

        Ok(RecordResponse {
            success: true,
            data: self.record(entity, id),
            message: None,
        })
    }

    async fn create_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse> {
        self.track_call("create_record", entity);
        for record in &request.records {
            self.writes
                .lock()
                .unwrap()
                .push((entity.to_string(), record.clone()));
        }

        if let Some(response) = self.write_failure(entity)? {
            return Ok(response);
        }

        let results = request
            .records
            .iter()
            .map(|record| {
                let id = self.insert(entity, record.clone());
                RecordResult {
                    success: true,
                    data: self.record(entity, id),
                    message: None,
                }
            })
            .collect();

        Ok(WriteResponse {
            success: true,
            results: Some(results),
            message: None,
        })
    }

    async fn update_record(&self, entity: &str, request: &WriteRequest) -> GatewayResult<WriteResponse> {
        self.track_call("update_record", entity);
        for record in &request.records {
            self.writes
                .lock()
                .unwrap()
                .push((entity.to_string(), record.clone()));
        }

        if let Some(response) = self.write_failure(entity)? {
            return Ok(response);
        }

        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(entity.to_string()).or_default();

        let results = request
            .records
            .iter()
            .map(|update| {
                let existing = record_id(update)
                    .and_then(|id| table.iter_mut().find(|r| record_id(r) == Some(id)));
                match (existing, update.as_object()) {
                    (Some(Value::Object(stored)), Some(fields)) => {
                        merge(stored, fields);
                        RecordResult {
                            success: true,
                            data: Some(Value::Object(stored.clone())),
                            message: None,
                        }
                    }
                    _ => RecordResult {
                        success: false,
                        data: None,
                        message: Some("Record does not exist".to_string()),
                    },
                }
            })
            .collect();

        Ok(WriteResponse {
            success: true,
            results: Some(results),
            message: None,
        })
    }

    async fn delete_record(&self, entity: &str, request: &DeleteRequest) -> GatewayResult<WriteResponse> {
        self.track_call("delete_record", entity);

        if let Some(response) = self.write_failure(entity)? {
            return Ok(response);
        }

        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(entity.to_string()).or_default();

        let results = request
            .record_ids
            .iter()
            .map(|id| match table.iter().position(|r| record_id(r) == Some(*id)) {
                Some(index) => {
                    table.remove(index);
                    RecordResult {
                        success: true,
                        data: None,
                        message: None,
                    }
                }
                None => RecordResult {
                    success: false,
                    data: None,
                    message: Some("Record does not exist".to_string()),
                },
            })
            .collect();

        Ok(WriteResponse {
            success: true,
            results: Some(results),
            message: None,
        })
    }
}

fn merge(stored: &mut Map<String, Value>, update: &Map<String, Value>) {
    for (key, value) in update {
        stored.insert(key.clone(), value.clone());
    }
}
