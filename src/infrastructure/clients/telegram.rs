//! Telegram Bot API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::services::{BotError, BotTransport};
use crate::config::TelegramSettings;
use crate::domain::IncomingMessage;

// Wire types: the consumed slice of the Bot API update schema.

#[derive(Debug, Deserialize)]
struct Update {
    #[serde(rename = "update_id")]
    id: i64,
    message: Option<UpdateMessage>,
}

#[derive(Debug, Deserialize)]
struct UpdateMessage {
    #[serde(rename = "message_id")]
    id: i64,
    #[serde(default)]
    text: String,
    chat: Chat,
    from: Option<User>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i64>,
}

/// Telegram Bot API adapter.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    default_chat_id: Option<i64>,
}

impl TelegramClient {
    pub fn new(settings: &TelegramSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!(
                "{}/bot{}",
                settings.api_base.trim_end_matches('/'),
                settings.bot_token
            ),
            default_chat_id: settings.chat_id,
        }
    }
}

#[async_trait]
impl BotTransport for TelegramClient {
    fn parse_update(&self, body: &[u8]) -> Option<IncomingMessage> {
        let update: Update = match serde_json::from_slice(body) {
            Ok(update) => update,
            Err(err) => {
                warn!(error = %err, "could not decode incoming update");
                return None;
            }
        };

        let Some(message) = update.message else {
            debug!(update = update.id, "update carries no message");
            return None;
        };

        let user = message.from?;
        if user.id == 0 {
            return None;
        }

        if message.text.is_empty() {
            return None;
        }

        Some(IncomingMessage {
            message_id: message.id,
            user_id: user.id.to_string(),
            chat_id: message.chat.id,
            text: message.text,
        })
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<(), BotError> {
        let url = format!("{}/sendMessage", self.base_url);
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_to_message_id,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| BotError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    fn default_chat_id(&self) -> Result<i64, BotError> {
        self.default_chat_id.ok_or(BotError::MissingChatId)
    }
}
