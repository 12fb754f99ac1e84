//! External Service Clients
//!
//! reqwest-based adapters implementing the application-layer ports. Each
//! client is a stateless handle, constructed once at startup and shared
//! across requests; the Cloud Tasks client additionally hands out
//! request-scoped sessions.

pub mod bitly;
pub mod cloud_tasks;
pub mod openai;
pub mod shortio;
pub mod telegram;

pub use bitly::BitlyClient;
pub use cloud_tasks::CloudTasksClient;
pub use openai::OpenAiClient;
pub use shortio::ShortIoClient;
pub use telegram::TelegramClient;
