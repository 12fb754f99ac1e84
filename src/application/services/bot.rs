//! Chat transport port.

use async_trait::async_trait;

use crate::domain::IncomingMessage;

/// Bot transport failure.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("telegram request failed: {0}")]
    Transport(String),

    #[error("telegram API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("default chat id is not configured")]
    MissingChatId,
}

/// Capabilities of the chat platform the bot talks to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotTransport: Send + Sync {
    /// Parse an inbound update body into a message, if it carries one.
    ///
    /// Updates without a message, without a valid sender, or with empty
    /// text yield `None` (logged, not failed).
    fn parse_update(&self, body: &[u8]) -> Option<IncomingMessage>;

    /// Deliver a message, optionally as a reply.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<(), BotError>;

    /// Chat that receives bank-transaction and operator notifications.
    fn default_chat_id(&self) -> Result<i64, BotError>;
}
