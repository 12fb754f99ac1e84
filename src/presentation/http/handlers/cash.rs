//! Cash-message handler.
//!
//! Receives Telegram updates carrying free-text expenses ("400 Вокал").
//! The update is acknowledged immediately; classification and notification
//! run on a detached background task whose failures are observable only
//! through its own logging and scheduled notifications, never through this
//! response.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use tracing::{info, warn};

use super::ok;
use crate::application::services::{cash_prompts, FALLBACK_TEXT};
use crate::domain::{IncomingMessage, ScheduledMessage};
use crate::startup::AppState;

/// Handle a free-text expense message from the chat webhook.
pub async fn cash_message(State(state): State<AppState>, body: Bytes) -> Response {
    info!("handling cash message");

    let Some(message) = state.bot.parse_update(&body) else {
        info!("no message to process");
        return ok();
    };
    info!(text = %message.text, "update received");

    tokio::spawn(classify_and_notify(state, message));

    ok()
}

async fn classify_and_notify(state: AppState, message: IncomingMessage) {
    let session = state.dispatcher.connect().await;

    let (system_prompt, user_prompt) = cash_prompts(&message.text);
    let Some(classification) = state.classifier.classify(&system_prompt, &user_prompt).await
    else {
        warn!("no response from AI");
        let fallback = ScheduledMessage {
            chat_id: message.chat_id,
            text: FALLBACK_TEXT.into(),
            reply_to_message_id: Some(message.message_id),
        };
        session.schedule_message(&fallback, Utc::now()).await;
        return;
    };

    info!(
        category = %classification.category,
        subcategory = %classification.subcategory,
        amount = classification.amount,
        "message classified"
    );

    let text = state
        .notifier
        .assemble(&classification, &state.settings.accounts.cash, None)
        .await;

    let scheduled = ScheduledMessage {
        chat_id: message.chat_id,
        text,
        reply_to_message_id: Some(message.message_id),
    };
    session.schedule_message(&scheduled, Utc::now()).await;
}
