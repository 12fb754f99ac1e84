//! Deferred-delivery handlers.
//!
//! These endpoints are the POST callbacks the external task queue invokes.
//! Their bodies are the payloads serialized by the dispatcher; a malformed
//! body is a 400 so the queue surfaces the bad task instead of retrying it
//! forever as a success.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use tracing::{error, info, warn};

use super::ok;
use crate::application::services::{transaction_prompts, FALLBACK_TEXT};
use crate::domain::{ScheduledMessage, ScheduledTransaction};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Deliver a deferred chat message.
pub async fn deliver_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let message: ScheduledMessage = serde_json::from_slice(&body).map_err(|err| {
        warn!(error = %err, "could not parse message");
        AppError::BadRequest("Could not parse message".into())
    })?;

    match state
        .bot
        .send_message(message.chat_id, &message.text, message.reply_to_message_id)
        .await
    {
        Ok(()) => info!(chat = message.chat_id, "message sent"),
        Err(err) => error!(error = %err, chat = message.chat_id, "could not send message"),
    }

    Ok(ok())
}

/// Deliver a deferred bank transaction: classify it and schedule the final
/// chat notification.
pub async fn deliver_transaction(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let transaction: ScheduledTransaction = serde_json::from_slice(&body).map_err(|err| {
        warn!(error = %err, "could not parse transaction");
        AppError::BadRequest("Could not parse transaction".into())
    })?;

    let session = state.dispatcher.connect().await;

    let (system_prompt, user_prompt) = transaction_prompts(&transaction);
    let Some(classification) = state.classifier.classify(&system_prompt, &user_prompt).await
    else {
        warn!("no response from AI");
        session
            .schedule_message(
                &ScheduledMessage {
                    chat_id: transaction.chat_id,
                    text: FALLBACK_TEXT.into(),
                    reply_to_message_id: None,
                },
                Utc::now(),
            )
            .await;
        return Ok(ok());
    };

    info!(
        category = %classification.category,
        subcategory = %classification.subcategory,
        amount = classification.amount,
        "transaction classified"
    );

    let account = state
        .settings
        .accounts
        .display_name(&transaction.account_id)
        .to_string();
    let text = state
        .notifier
        .assemble(&classification, &account, Some(transaction.time))
        .await;

    session
        .schedule_message(
            &ScheduledMessage {
                chat_id: transaction.chat_id,
                text,
                reply_to_message_id: None,
            },
            Utc::now(),
        )
        .await;

    Ok(ok())
}
