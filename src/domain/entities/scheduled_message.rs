//! Deferred chat message entity.

use serde::{Deserialize, Serialize};

/// A unit of deferred chat delivery.
///
/// Created by handlers, serialized into the task queue, and consumed exactly
/// once by the deferred-message delivery endpoint. The field names double as
/// the Telegram sendMessage body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMessage {
    #[serde(rename = "chatId")]
    pub chat_id: i64,

    pub text: String,

    #[serde(rename = "reply_to_message_id", skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}
