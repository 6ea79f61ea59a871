//! Traffic counters for the record store client.
//!
//! Every round trip to the store bumps the request counters. Records read
//! and records successfully written are tallied separately.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared counters; clones update the same totals.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Round trips to the store, failed ones included
    http_requests_total: Arc<AtomicU64>,

    /// Round trips that ended in a transport or status error
    http_errors_total: Arc<AtomicU64>,

    /// Wall time spent waiting on the store, in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Records handed back by queries and id lookups
    records_fetched_total: Arc<AtomicU64>,

    /// Records in create, update and delete calls the store answered
    records_written_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            records_fetched_total: Arc::new(AtomicU64::new(0)),
            records_written_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Count one round trip taking `duration`.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Count one failed round trip.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_records_fetched(&self, count: usize) {
        self.records_fetched_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Count records in a write the store answered.
    pub fn record_records_written(&self, count: usize) {
        self.records_written_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Mean round-trip time in milliseconds, 0 before the first request.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn records_fetched_total(&self) -> u64 {
        self.records_fetched_total.load(Ordering::Relaxed)
    }

    pub fn records_written_total(&self) -> u64 {
        self.records_written_total.load(Ordering::Relaxed)
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.http_requests_total.store(0, Ordering::Relaxed);
        self.http_errors_total.store(0, Ordering::Relaxed);
        self.http_duration_total_ms.store(0, Ordering::Relaxed);
        self.records_fetched_total.store(0, Ordering::Relaxed);
        self.records_written_total.store(0, Ordering::Relaxed);
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            records_fetched_total: self.records_fetched_total(),
            records_written_total: self.records_written_total(),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub records_fetched_total: u64,
    pub records_written_total: u64,
}

/// Measures one store round trip and files it with [`Metrics`] when done.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// File the elapsed time as a successful round trip.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// File the elapsed time as a failed round trip.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
