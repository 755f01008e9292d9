//! End-to-end HTTP tests for the invoice API
//!
//! Runs the real router against the in-memory store, exercising the wire
//! format, status codes, and the structured error envelope.

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;

use domain_invoicing::{InMemoryInvoiceStore, InvoiceService};
use interface_api::create_router;

fn server() -> TestServer {
    let service = InvoiceService::new(Arc::new(InMemoryInvoiceStore::new()));
    TestServer::new(create_router(service)).unwrap()
}

/// Decimals may serialize as JSON strings; compare through Decimal.
fn decimal(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).unwrap()
}

#[tokio::test]
async fn test_create_invoice_returns_id() {
    let server = server();

    let response = server
        .post("/invoices")
        .json(&json!({"amount": 1000, "dueDate": "2025-06-01"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["id"].as_str().unwrap().starts_with("INV-"));
}

#[tokio::test]
async fn test_create_invoice_rejects_non_positive_amount() {
    let server = server();

    let response = server
        .post("/invoices")
        .json(&json!({"amount": -10, "dueDate": "2025-06-01"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], "BAD_REQUEST");
    assert_eq!(body["message"], "Validation failed");
    assert!(body["errors"][0].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_create_invoice_rejects_malformed_date() {
    let server = server();

    let response = server
        .post("/invoices")
        .json(&json!({"amount": 100, "dueDate": "01/06/2025"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], "BAD_REQUEST");
    assert!(!body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_invoice_rejects_missing_fields() {
    let server = server();

    let response = server.post("/invoices").json(&json!({"amount": 100})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_invoices_empty() {
    let server = server();

    let response = server.get("/invoices").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_invoices_after_creates() {
    let server = server();

    for _ in 0..3 {
        server
            .post("/invoices")
            .json(&json!({"amount": 500, "dueDate": "2025-06-01"}))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = server.get("/invoices").await.json();
    let invoices = body.as_array().unwrap();
    assert_eq!(invoices.len(), 3);

    let first = &invoices[0];
    assert_eq!(decimal(&first["amount"]), dec!(500));
    assert_eq!(decimal(&first["paidAmount"]), dec!(0));
    assert_eq!(first["dueDate"], "2025-06-01");
    assert_eq!(first["status"], "pending");
}

#[tokio::test]
async fn test_payment_flow_partial_then_paid() {
    let server = server();

    let created: Value = server
        .post("/invoices")
        .json(&json!({"amount": 1000, "dueDate": "2025-06-01"}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    server
        .post(&format!("/invoices/{id}/payments"))
        .json(&json!({"amount": 400}))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = server.get("/invoices").await.json();
    assert_eq!(decimal(&body[0]["paidAmount"]), dec!(400));
    assert_eq!(body[0]["status"], "pending");

    server
        .post(&format!("/invoices/{id}/payments"))
        .json(&json!({"amount": 600}))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = server.get("/invoices").await.json();
    assert_eq!(decimal(&body[0]["paidAmount"]), dec!(1000));
    assert_eq!(body[0]["status"], "paid");
}

#[tokio::test]
async fn test_payment_unknown_invoice_is_not_found() {
    let server = server();

    let response = server
        .post("/invoices/INV-00000000-0000-0000-0000-000000000000/payments")
        .json(&json!({"amount": 100}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["status"], "NOT_FOUND");
    assert_eq!(body["errors"][0], "Resource not found");
    assert!(body["message"].as_str().unwrap().contains("Invoice not found"));
}

#[tokio::test]
async fn test_payment_unparseable_id_is_not_found() {
    let server = server();

    let response = server
        .post("/invoices/not-an-id/payments")
        .json(&json!({"amount": 100}))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_payment_rejects_non_positive_amount() {
    let server = server();

    let created: Value = server
        .post("/invoices")
        .json(&json!({"amount": 1000, "dueDate": "2025-06-01"}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/invoices/{id}/payments"))
        .json(&json!({"amount": 0}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_overdue_rolls_over_partially_paid() {
    let server = server();
    let past_due = (Utc::now().date_naive() - Duration::days(60)).to_string();

    let created: Value = server
        .post("/invoices")
        .json(&json!({"amount": 1000, "dueDate": past_due}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    server
        .post(&format!("/invoices/{id}/payments"))
        .json(&json!({"amount": 400}))
        .await
        .assert_status(StatusCode::OK);

    server
        .post("/invoices/process-overdue")
        .json(&json!({"lateFee": 100, "overdueDays": 10}))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = server.get("/invoices").await.json();
    let invoices = body.as_array().unwrap();
    assert_eq!(invoices.len(), 2);

    let original = invoices
        .iter()
        .find(|i| i["id"].as_str().unwrap() == id)
        .unwrap();
    assert_eq!(original["status"], "paid");
    assert_eq!(decimal(&original["paidAmount"]), dec!(400));

    let successor = invoices
        .iter()
        .find(|i| i["id"].as_str().unwrap() != id)
        .unwrap();
    assert_eq!(decimal(&successor["amount"]), dec!(700));
    assert_eq!(successor["status"], "pending");
    let expected_due = (Utc::now().date_naive() + Duration::days(10)).to_string();
    assert_eq!(successor["dueDate"], expected_due.as_str());
}

#[tokio::test]
async fn test_process_overdue_voids_unpaid() {
    let server = server();
    let past_due = (Utc::now().date_naive() - Duration::days(60)).to_string();

    let created: Value = server
        .post("/invoices")
        .json(&json!({"amount": 1000, "dueDate": past_due}))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    server
        .post("/invoices/process-overdue")
        .json(&json!({"lateFee": 100, "overdueDays": 10}))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = server.get("/invoices").await.json();
    let invoices = body.as_array().unwrap();
    assert_eq!(invoices.len(), 2);

    let original = invoices
        .iter()
        .find(|i| i["id"].as_str().unwrap() == id)
        .unwrap();
    assert_eq!(original["status"], "void");

    let successor = invoices
        .iter()
        .find(|i| i["id"].as_str().unwrap() != id)
        .unwrap();
    assert_eq!(decimal(&successor["amount"]), dec!(1100));
}

#[tokio::test]
async fn test_process_overdue_leaves_current_invoices() {
    let server = server();
    let future_due = (Utc::now().date_naive() + Duration::days(30)).to_string();

    server
        .post("/invoices")
        .json(&json!({"amount": 1000, "dueDate": future_due}))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/invoices/process-overdue")
        .json(&json!({"lateFee": 100, "overdueDays": 10}))
        .await
        .assert_status(StatusCode::OK);

    let body: Value = server.get("/invoices").await.json();
    let invoices = body.as_array().unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["status"], "pending");
}

#[tokio::test]
async fn test_process_overdue_rejects_missing_late_fee() {
    let server = server();

    let response = server
        .post("/invoices/process-overdue")
        .json(&json!({"overdueDays": 10}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_check() {
    let server = server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}
