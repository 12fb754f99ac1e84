//! Parsed inbound chat message.

/// A Telegram update reduced to the fields the pipeline consumes.
///
/// Produced by the bot transport's update parsing; updates without a valid
/// sender or without text never become an `IncomingMessage`.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub user_id: String,
    pub chat_id: i64,
    pub text: String,
}
