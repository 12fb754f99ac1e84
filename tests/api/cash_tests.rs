//! Cash-Message Handler Tests
//!
//! The handler acknowledges immediately and classifies on a detached
//! background task, so the tests poll the recording queue.

use axum::http::StatusCode;

use expense_bot::application::services::FALLBACK_TEXT;
use expense_bot::domain::ScheduledMessage;

use crate::common::{TestApp, TestAppBuilder};

const UPDATE: &str = r#"{"update_id":10,"message":{"message_id":42,"text":"400 Вокал","chat":{"id":77},"from":{"id":5,"is_bot":false}}}"#;

#[tokio::test]
async fn update_is_acknowledged_and_classified_in_background() {
    let app = TestApp::new();

    let response = app.server.post("/cash").text(UPDATE).await;

    // The response does not wait for classification.
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    app.wait_for_tasks(1).await;

    let tasks = app.tasks.lock().unwrap();
    assert!(tasks[0].queue_path.ends_with("/queues/messages"));

    let msg: ScheduledMessage = serde_json::from_slice(&tasks[0].body).unwrap();
    assert_eq!(msg.chat_id, 77);
    assert_eq!(msg.reply_to_message_id, Some(42));
    assert!(msg.text.starts_with("Category: Transport"));

    // Cash expenses deep-link into the Cash account, undated.
    let seen = app.shortener.seen.lock().unwrap();
    assert!(seen[0].contains("account=Cash"));
    assert!(!seen[0].contains("date="));

    let prompts = app.classifier.prompts.lock().unwrap();
    assert_eq!(prompts[0].1, "Classify this input: 400 Вокал");
}

#[tokio::test]
async fn classification_absence_replies_with_fallback() {
    let app = TestAppBuilder::default().classification(None).build();

    let response = app.server.post("/cash").text(UPDATE).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    app.wait_for_tasks(1).await;

    let tasks = app.tasks.lock().unwrap();
    let msg: ScheduledMessage = serde_json::from_slice(&tasks[0].body).unwrap();
    assert_eq!(msg.text, FALLBACK_TEXT);
    assert_eq!(msg.reply_to_message_id, Some(42));
}

#[tokio::test]
async fn update_without_message_is_acknowledged_and_ignored() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/cash")
        .text(r#"{"update_id":10,"edited_message":{"message_id":1}}"#)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(app.tasks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn undecodable_update_is_acknowledged_and_ignored() {
    let app = TestApp::new();

    let response = app.server.post("/cash").text("not an update").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}
