//! Monobank Webhook Tests
//!
//! End-to-end behavior of the bank webhook: parsing, MCC category lookup,
//! transaction scheduling, and operator error notifications.

use axum::http::StatusCode;

use expense_bot::domain::{ScheduledMessage, ScheduledTransaction};

use crate::common::{TestApp, TestAppBuilder, TEST_CHAT_ID};

const BOLT_PAYLOAD: &str = r#"{"type":"StatementItem","data":{"account":"a-dnHAO9ExLnboGJP_pdwA","statementItem":{"id":"5ylwUXGpDyabl0HmHg","time":1746194127,"description":"Bolt","mcc":4121,"originalMcc":4121,"amount":-12000,"operationAmount":-12000,"currencyCode":980,"commissionRate":0,"cashbackAmount":0,"balance":2964804,"hold":true,"receiptId":"P5AE-PM51-X383-7M9A"}}}"#;

const REFUND_PAYLOAD: &str = r#"{"type":"StatementItem","data":{"account":"a-dnHAO9ExLnboGJP_pdwA","statementItem":{"id":"X0uqludK5DSCXhYSUQ","time":1768577787,"description":"Скасування. Bolt","mcc":4121,"originalMcc":4111,"amount":17600,"operationAmount":17600,"currencyCode":980,"commissionRate":0,"cashbackAmount":0,"balance":2456014,"hold":false}}}"#;

const UNKNOWN_MCC_PAYLOAD: &str = r#"{"type":"StatementItem","data":{"account":"a-dnHAO9ExLnboGJP_pdwA","statementItem":{"id":"x","time":1746194127,"description":"???","mcc":12345,"amount":-100}}}"#;

#[tokio::test]
async fn probe_get_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/webhooks/monobank").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn statement_is_scheduled_as_transaction() {
    let app = TestApp::new();

    let response = app.server.post("/webhooks/monobank").text(BOLT_PAYLOAD).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let tasks = app.tasks.lock().unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].queue_path.ends_with("/queues/transactions"));
    assert_eq!(tasks[0].url, "https://bot.example.com/transactions");

    let txn: ScheduledTransaction = serde_json::from_slice(&tasks[0].body).unwrap();
    assert_eq!(txn.chat_id, TEST_CHAT_ID);
    assert_eq!(txn.mcc, 4121);
    assert_eq!(txn.category, "Transportation Services");
    assert_eq!(txn.description, "Bolt");
    assert_eq!(txn.amount, 120.00);
    assert_eq!(txn.time, 1746194127);
    assert!(!txn.is_refund);
    assert_eq!(txn.account_id, "a-dnHAO9ExLnboGJP_pdwA");
}

#[tokio::test]
async fn refund_statement_sets_refund_flag() {
    let app = TestApp::new();

    app.server.post("/webhooks/monobank").text(REFUND_PAYLOAD).await;

    let tasks = app.tasks.lock().unwrap();
    let txn: ScheduledTransaction = serde_json::from_slice(&tasks[0].body).unwrap();
    assert!(txn.is_refund);
    assert_eq!(txn.amount, 176.00);
}

#[tokio::test]
async fn malformed_payload_returns_400_and_schedules_nothing() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/webhooks/monobank")
        .text(r#"{"type":"StatementItem","data":{broken}}"#)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Could not parse data");
    assert!(app.tasks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_mcc_notifies_operator_once_and_returns_500() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/webhooks/monobank")
        .text(UNKNOWN_MCC_PAYLOAD)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Could not get category");

    // Exactly one notification: the handler's tagged message. The response
    // layer sees the marker and does not add a generic one.
    let tasks = app.tasks.lock().unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].queue_path.ends_with("/queues/messages"));

    let msg: ScheduledMessage = serde_json::from_slice(&tasks[0].body).unwrap();
    assert_eq!(msg.chat_id, TEST_CHAT_ID);
    assert_eq!(msg.text, "⚠️ MCC code not found: 12345");
    assert_eq!(msg.reply_to_message_id, None);
}

#[tokio::test]
async fn missing_chat_id_returns_500() {
    let app = TestAppBuilder::default().without_chat_id().build();

    let response = app.server.post("/webhooks/monobank").text(BOLT_PAYLOAD).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Could not get chat ID");
    // The response layer cannot notify either without a chat id.
    assert!(app.tasks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_method_returns_405() {
    let app = TestApp::new();

    let response = app.server.delete("/webhooks/monobank").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}
