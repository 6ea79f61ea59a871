mod mocks;

use crm_services::models::MetricValue;
use crm_services::services::{MetricService, MetricServiceImpl};
use mocks::{Failure, MockRecordGateway};
use serde_json::json;
use std::sync::Arc;

fn setup() -> (MockRecordGateway, MetricServiceImpl) {
    let gateway = MockRecordGateway::new();
    gateway.insert(
        "metric_c",
        json!({"Name": "pipeline", "label_c": "Pipeline value", "value_c": 125000, "change_c": 12.5, "trend_c": "up"}),
    );
    gateway.insert(
        "metric_c",
        json!({"Name": "win_rate", "label_c": "Win rate", "value_c": "34%", "change_c": "-2%", "trend_c": "down"}),
    );
    let service = MetricServiceImpl::new(Arc::new(gateway.clone()));
    (gateway, service)
}

#[tokio::test]
async fn test_get_all() {
    let (gateway, service) = setup();

    let metrics = service.get_all().await;
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].value, Some(MetricValue::Number(125000.0)));
    assert_eq!(metrics[1].value, Some(MetricValue::Text("34%".to_string())));

    let query = gateway.last_query("metric_c").unwrap();
    assert!(query.field_names().contains(&"Tags"));
}

#[tokio::test]
async fn test_dashboard_metrics() {
    let (gateway, service) = setup();

    let metrics = service.get_dashboard_metrics().await;
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[1].trend.as_deref(), Some("down"));

    let query = gateway.last_query("metric_c").unwrap();
    assert_eq!(
        query.field_names(),
        vec!["Name", "label_c", "value_c", "change_c", "trend_c"]
    );
}

#[tokio::test]
async fn test_failures_yield_empty() {
    let (gateway, service) = setup();

    gateway.fail("metric_c", Failure::Transport);
    assert!(service.get_all().await.is_empty());
    assert!(service.get_dashboard_metrics().await.is_empty());
    assert_eq!(gateway.get_call_count("fetch_records", "metric_c"), 2);
}
