//! Application Services
//!
//! Ports and services coordinating the pipeline.
//!
//! ## Available Services
//!
//! - **FallbackShortener**: Chain-of-responsibility URL shortening
//! - **Dispatcher**: Deferred delivery through the external task queue
//! - **NotificationService**: Notification text + deep-link assembly
//! - **Classifier / prompts**: LLM classification port and prompt builders
//! - **BotTransport**: Chat transport port

pub mod bot;
pub mod classifier;
pub mod dispatcher;
pub mod notification;
pub mod shortener;

// Re-export bot transport port
pub use bot::{BotError, BotTransport};

// Re-export classifier port and prompt builders
pub use classifier::{cash_prompts, transaction_prompts, Classifier};

// Re-export dispatcher types
pub use dispatcher::{Dispatcher, DispatcherSession, QueueClient, QueueError, QueueTask, TaskQueue};

// Re-export notification service types
pub use notification::{NotificationService, FALLBACK_TEXT};

// Re-export shortener types
pub use shortener::{FallbackShortener, ShortenError, UrlShortener, QUOTA_LIMIT_MESSAGE};
