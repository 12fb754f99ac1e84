//! Middleware
//!
//! Tower middleware for response processing.

pub mod error_notify;

pub use error_notify::{ErrorNotified, ErrorNotifyLayer, SERVER_ERROR_TEXT};
