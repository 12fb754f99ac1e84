//! Application settings and configuration structures.

use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Telegram bot configuration
    pub telegram: TelegramSettings,

    /// LLM classifier configuration (OpenAI-compatible)
    pub classifier: ClassifierSettings,

    /// URL shortening provider configuration
    pub shortener: ShortenerSettings,

    /// Cloud Tasks queue configuration
    pub tasks: TaskSettings,

    /// Account display-name mapping for deep links
    pub accounts: AccountSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Telegram Bot API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramSettings {
    /// Bot token issued by BotFather
    pub bot_token: String,

    /// Chat that receives bank-transaction and operator notifications
    pub chat_id: Option<i64>,

    /// Bot API base URL (overridable for tests)
    pub api_base: String,
}

/// LLM classifier configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    /// API key for the chat-completions endpoint
    pub api_key: String,

    /// Chat-completions endpoint URL
    pub api_url: String,

    /// Model name (e.g., "gpt-4o")
    pub model: String,
}

/// URL shortening provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenerSettings {
    /// Short.io provider (first in the fallback chain)
    pub shortio: ShortIoSettings,

    /// Bitly provider (second in the fallback chain)
    pub bitly: BitlySettings,
}

/// Short.io configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortIoSettings {
    /// API key sent in the Authorization header
    pub api_key: String,

    /// Branded short domain links are created under
    pub domain: String,

    /// Links API endpoint
    pub api_url: String,
}

/// Bitly configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BitlySettings {
    /// OAuth access token (Bearer)
    pub api_key: String,

    /// Shorten API endpoint
    pub api_url: String,
}

/// Cloud Tasks configuration.
///
/// The dispatcher derives queue paths and callback URLs from these values:
/// `projects/{project_id}/locations/{location_id}/queues/{queue}` and
/// `{callback_base}/{endpoint}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSettings {
    /// GCP project hosting the queues
    pub project_id: String,

    /// Queue region (e.g., "europe-west1")
    pub location_id: String,

    /// Queue for deferred chat messages
    pub message_queue: String,

    /// Queue for deferred bank transactions
    pub transaction_queue: String,

    /// Base URL the queue calls back into (this service's public URL)
    pub callback_base: String,

    /// Cloud Tasks REST API base
    pub api_base: String,

    /// Bearer token for the Cloud Tasks API, if not ambient
    pub auth_token: Option<String>,
}

/// Account display names used in MoneyWiz deep links.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
    /// Display name for free-text (cash) expenses
    pub cash: String,

    /// Fallback display name for bank accounts not in `names`
    pub default_bank: String,

    /// Monobank account id -> MoneyWiz account name
    #[serde(default)]
    pub names: HashMap<String, String>,
}

impl AccountSettings {
    /// Resolve the display name for a bank account id.
    pub fn display_name(&self, account_id: &str) -> &str {
        self.names
            .get(account_id)
            .unwrap_or(&self.default_bank)
            .as_str()
    }
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the Telegram bot token is missing.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("telegram.api_base", "https://api.telegram.org")?
            .set_default("classifier.api_url", "https://api.openai.com/v1/chat/completions")?
            .set_default("classifier.model", "gpt-4o")?
            .set_default("shortener.shortio.api_url", "https://api.short.io/links")?
            .set_default("shortener.bitly.api_url", "https://api-ssl.bitly.com/v4/shorten")?
            .set_default("tasks.message_queue", "messages")?
            .set_default("tasks.transaction_queue", "transactions")?
            .set_default("tasks.api_base", "https://cloudtasks.googleapis.com/v2")?
            .set_default("accounts.cash", "Cash")?
            .set_default("accounts.default_bank", "MonobankUAH")?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("telegram.bot_token", std::env::var("TELEGRAM_BOT_TOKEN").ok())?
            .set_override_option("telegram.chat_id", std::env::var("TELEGRAM_CHAT_ID").ok())?
            .set_override_option("classifier.api_key", std::env::var("AI_API_KEY").ok())?
            .set_override_option(
                "shortener.shortio.api_key",
                std::env::var("SHORTIO_API_KEY").ok(),
            )?
            .set_override_option(
                "shortener.bitly.api_key",
                std::env::var("BITLY_API_KEY").ok(),
            )?
            .set_override_option("tasks.project_id", std::env::var("TASKS_PROJECT_ID").ok())?
            .set_override_option("tasks.location_id", std::env::var("TASKS_LOCATION_ID").ok())?
            .set_override_option(
                "tasks.callback_base",
                std::env::var("TASKS_CALLBACK_BASE").ok(),
            )?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                if settings.telegram.bot_token.trim().is_empty() {
                    return Err(ConfigError::Message(
                        "telegram.bot_token must be set (TELEGRAM_BOT_TOKEN)".into(),
                    ));
                }
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
