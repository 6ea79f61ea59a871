mod mocks;

use crm_services::error::GatewayError;
use crm_services::models::DealInput;
use crm_services::services::{DealService, DealServiceImpl};
use mocks::{Failure, MockRecordGateway};
use serde_json::json;
use std::sync::Arc;

fn setup() -> (MockRecordGateway, DealServiceImpl) {
    let gateway = MockRecordGateway::new();
    gateway.insert(
        "deal_c",
        json!({"Name": "Rockets", "company_c": "Acme", "value_c": 1500, "stage_c": "Proposal"}),
    );
    gateway.insert(
        "deal_c",
        json!({"Name": "Renewal", "company_c": "Globex", "value_c": "900", "stage_c": "Lead"}),
    );
    gateway.insert(
        "deal_c",
        json!({"Name": "Anvils", "company_c": "Acme", "stage_c": "Lead", "Tags": ["q3"]}),
    );
    let service = DealServiceImpl::new(Arc::new(gateway.clone()));
    (gateway, service)
}

#[tokio::test]
async fn test_get_all() {
    let (_gateway, service) = setup();

    let deals = service.get_all().await;
    assert_eq!(deals.len(), 3);
    assert_eq!(deals[0].value, Some(1500.0));
    assert_eq!(deals[1].value, Some(900.0));
    assert_eq!(deals[2].value, None);
    assert_eq!(deals[2].tags, vec!["q3"]);
}

#[tokio::test]
async fn test_get_by_id_uses_detail_projection() {
    let (gateway, service) = setup();

    let deal = service.get_by_id(1).await.unwrap();
    assert_eq!(deal.name.as_deref(), Some("Rockets"));

    let fields = gateway.last_query("deal_c").unwrap();
    assert!(fields.field_names().contains(&"expected_close_date_c"));

    assert!(service.get_by_id(77).await.is_none());

    gateway.fail("deal_c", Failure::Rejected(Some("Record not found".to_string())));
    assert!(service.get_by_id(1).await.is_none());
}

#[tokio::test]
async fn test_create_defaults_stage_and_value() {
    let (gateway, service) = setup();

    let input = DealInput {
        name: Some("Turbines".to_string()),
        company: Some("Initech".to_string()),
        ..Default::default()
    };
    let created = service.create(&input).await.unwrap().unwrap();

    assert_eq!(created.stage.as_deref(), Some("Lead"));
    assert_eq!(created.value, Some(0.0));
    assert!(created.created_at.is_some());

    let written = gateway.last_write("deal_c").unwrap();
    assert_eq!(written["stage_c"], "Lead");
    assert_eq!(written["value_c"], 0.0);
}

#[tokio::test]
async fn test_create_keeps_given_stage() {
    let (_gateway, service) = setup();

    let input: DealInput = serde_json::from_value(json!({
        "Name": "Pumps",
        "stage": "Negotiation",
        "value": 4200.0
    }))
    .unwrap();
    let created = service.create(&input).await.unwrap().unwrap();

    assert_eq!(created.stage.as_deref(), Some("Negotiation"));
    assert_eq!(created.value, Some(4200.0));
}

#[tokio::test]
async fn test_update_and_failure() {
    let (gateway, service) = setup();

    let input = DealInput {
        stage: Some("Won".to_string()),
        value: Some(1600.0),
        ..Default::default()
    };
    let updated = service.update(1, &input).await.unwrap().unwrap();
    assert_eq!(updated.stage.as_deref(), Some("Won"));
    assert_eq!(updated.value, Some(1600.0));
    assert_eq!(updated.name.as_deref(), Some("Rockets"));

    gateway.fail("deal_c", Failure::Transport);
    let result = service.update(1, &input).await;
    assert!(matches!(result, Err(GatewayError::HttpError(_))));
}

#[tokio::test]
async fn test_delete() {
    let (gateway, service) = setup();

    service.delete(3).await.unwrap();
    assert_eq!(gateway.records("deal_c").len(), 2);

    gateway.fail("deal_c", Failure::Rejected(Some("Deal is locked".to_string())));
    let err = service.delete(1).await.unwrap_err();
    assert!(matches!(err, GatewayError::Rejected(_)));
    assert_eq!(err.to_string(), "Deal is locked");
}

#[tokio::test]
async fn test_search() {
    let (gateway, service) = setup();

    let acme = service.search("acme").await;
    assert_eq!(acme.len(), 2);

    let proposals = service.search("propos").await;
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].id, 1);

    gateway.fail("deal_c", Failure::Transport);
    assert!(service.search("acme").await.is_empty());
}

#[tokio::test]
async fn test_get_by_stage_is_exact() {
    let (gateway, service) = setup();

    let leads = service.get_by_stage("Lead").await;
    let names: Vec<_> = leads.iter().filter_map(|d| d.name.as_deref()).collect();
    assert_eq!(names, vec!["Renewal", "Anvils"]);

    assert!(service.get_by_stage("lead").await.is_empty());
    assert!(service.get_by_stage("Closed").await.is_empty());

    let query = gateway.last_query("deal_c").unwrap();
    assert_eq!(query.filters[0].field_name, "stage_c");
}

#[tokio::test]
async fn test_created_deal_reads_back_unchanged() {
    let (_gateway, service) = setup();

    let input = DealInput {
        name: Some("Expansion".to_string()),
        company: Some("Acme".to_string()),
        value: Some(12_500.5),
        stage: Some("Negotiation".to_string()),
        expected_close_date: Some("2024-09-30".to_string()),
    };
    let created = service.create(&input).await.unwrap().unwrap();

    let fetched = service.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, input.name);
    assert_eq!(fetched.company, input.company);
    assert_eq!(fetched.value, input.value);
    assert_eq!(fetched.stage, input.stage);
    assert_eq!(fetched.expected_close_date, input.expected_close_date);
    assert!(fetched.created_at.is_some());
}

#[tokio::test]
async fn test_blank_and_whitespace_search_equal_get_all() {
    let (_gateway, service) = setup();

    let all = service.get_all().await;
    assert_eq!(service.search("").await, all);
    assert_eq!(service.search("  \t").await, all);
}
