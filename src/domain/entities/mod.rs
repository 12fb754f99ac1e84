//! # Domain Entities
//!
//! Immutable value objects passed by value through the notification
//! pipeline. The serde field names are wire contracts: scheduled payloads
//! round-trip through the external task queue and come back as the bodies
//! of the deferred-delivery endpoints.
//!
//! ## Core Entities
//!
//! - **ScheduledMessage**: A unit of deferred chat delivery
//! - **ScheduledTransaction**: A deferred bank-transaction notification
//! - **Classification**: Category/subcategory/amount triple from the LLM
//! - **IncomingMessage**: A parsed inbound Telegram message
//! - **WebhookPayload / StatementItem**: The consumed slice of the Monobank
//!   webhook schema

mod classification;
mod incoming_message;
mod scheduled_message;
mod scheduled_transaction;
mod statement;

pub use classification::Classification;
pub use incoming_message::IncomingMessage;
pub use scheduled_message::ScheduledMessage;
pub use scheduled_transaction::ScheduledTransaction;
pub use statement::{StatementData, StatementItem, WebhookPayload};
