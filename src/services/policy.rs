//! Failure policies shared by the entity services.
//!
//! Reads degrade to an empty or absent result; writes surface the error.
//! Every failure is logged with the entity and operation that produced it.

use crate::error::GatewayResult;

/// Collapse a failed listing into an empty one.
pub(crate) fn list_or_empty<T>(
    entity: &str,
    operation: &str,
    result: GatewayResult<Vec<T>>,
) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(entity, operation, error = %e, "Fetch failed, returning no records");
            Vec::new()
        }
    }
}

/// Collapse a failed single-record read into `None`.
pub(crate) fn record_or_none<T>(
    entity: &str,
    id: i64,
    result: GatewayResult<Option<T>>,
) -> Option<T> {
    match result {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(entity, id, error = %e, "Error fetching record");
            None
        }
    }
}

/// Log a failed write and pass the error on.
pub(crate) fn logged<T>(entity: &str, operation: &str, result: GatewayResult<T>) -> GatewayResult<T> {
    if let Err(e) = &result {
        tracing::error!(entity, operation, error = %e, "Write failed");
    }
    result
}

/// A query that is empty after trimming lists everything instead of searching.
pub(crate) fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
