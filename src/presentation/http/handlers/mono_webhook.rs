//! Monobank webhook handler.
//!
//! Parses the statement, resolves the MCC category, and defers the
//! transaction through the task queue so the webhook can return quickly.
//! Category-lookup failures are reported to the operator chat and answered
//! with 500 so the bank retries the delivery.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tracing::{error, info, warn};

use super::ok;
use crate::domain::categories::{category_from_mcc, CategoryError};
use crate::domain::{ScheduledMessage, ScheduledTransaction, WebhookPayload};
use crate::presentation::middleware::ErrorNotified;
use crate::startup::AppState;

/// Webhook liveness probe; the provider issues a GET when the webhook URL
/// is registered.
pub async fn webhook_probe() -> Response {
    info!("mono webhook is working");
    ok()
}

/// Handle a Monobank statement webhook.
pub async fn mono_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    info!("handling mono webhook");

    // Resolve the chat early so failures further down can be reported.
    let chat_id = match state.bot.default_chat_id() {
        Ok(chat_id) => chat_id,
        Err(err) => {
            error!(error = %err, "could not resolve chat id");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Could not get chat ID").into_response();
        }
    };

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "could not parse webhook payload");
            return (StatusCode::BAD_REQUEST, "Could not parse data").into_response();
        }
    };

    let item = &payload.data.statement_item;

    let category = match category_from_mcc(item.mcc) {
        Ok(category) => category,
        Err(err) => {
            error!(error = %err, mcc = item.mcc, "could not resolve category");
            notify_category_failure(&state, chat_id, &err).await;

            let mut response =
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not get category").into_response();
            // Already reported; the response layer must not notify again.
            response.extensions_mut().insert(ErrorNotified);
            return response;
        }
    };

    let transaction = ScheduledTransaction {
        chat_id,
        mcc: item.mcc,
        category: category.to_string(),
        description: item.description.clone(),
        amount: item.amount_decimal(),
        time: item.time,
        is_refund: item.is_refund(),
        account_id: payload.data.account.clone(),
    };

    let session = state.dispatcher.connect().await;
    session.schedule_transaction(&transaction, Utc::now()).await;

    info!(mcc = item.mcc, amount = transaction.amount, "transaction scheduled");
    ok()
}

/// Report a category-lookup failure to the operator chat, tagging the
/// known missing-MCC case distinctly from other failures.
async fn notify_category_failure(state: &AppState, chat_id: i64, err: &CategoryError) {
    let rendered = err.to_string();
    let text = if rendered.contains("MCC code not found") {
        format!("⚠️ {rendered}")
    } else {
        format!("❌ [Mono] Error getting category: {rendered}")
    };

    let session = state.dispatcher.connect().await;
    session
        .schedule_message(
            &ScheduledMessage {
                chat_id,
                text,
                reply_to_message_id: None,
            },
            Utc::now(),
        )
        .await;
    info!("scheduled notification for category failure");
}
