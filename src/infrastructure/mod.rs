//! Infrastructure Layer
//!
//! Implementations for external services:
//! - Telegram Bot API (chat transport)
//! - OpenAI chat completions (classifier)
//! - Short.io and Bitly (URL shortening providers)
//! - Google Cloud Tasks (durable task queue)

pub mod clients;
