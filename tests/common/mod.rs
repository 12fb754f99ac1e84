//! Common Test Utilities
//!
//! Test doubles for every port plus a TestApp builder that wires them into
//! the real router.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use expense_bot::application::services::{
    BotError, BotTransport, Classifier, Dispatcher, NotificationService, QueueClient, QueueError,
    QueueTask, ShortenError, TaskQueue, UrlShortener,
};
use expense_bot::config::{
    AccountSettings, BitlySettings, ClassifierSettings, ServerSettings, Settings,
    ShortIoSettings, ShortenerSettings, TaskSettings, TelegramSettings,
};
use expense_bot::domain::{Classification, IncomingMessage};
use expense_bot::presentation::http::routes;
use expense_bot::startup::AppState;

pub const TEST_CHAT_ID: i64 = 99;

/// A message captured by the recording bot.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub reply_to_message_id: Option<i64>,
}

/// Bot transport double: parses the minimal update shape and records sends.
pub struct RecordingBot {
    chat_id: Option<i64>,
    pub sent: Mutex<Vec<SentMessage>>,
}

#[async_trait]
impl BotTransport for RecordingBot {
    fn parse_update(&self, body: &[u8]) -> Option<IncomingMessage> {
        let update: serde_json::Value = serde_json::from_slice(body).ok()?;
        let message = update.get("message")?;
        let text = message.get("text")?.as_str()?;
        if text.is_empty() {
            return None;
        }
        Some(IncomingMessage {
            message_id: message.get("message_id")?.as_i64()?,
            user_id: message.get("from")?.get("id")?.as_i64()?.to_string(),
            chat_id: message.get("chat")?.get("id")?.as_i64()?,
            text: text.to_string(),
        })
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            reply_to_message_id,
        });
        Ok(())
    }

    fn default_chat_id(&self) -> Result<i64, BotError> {
        self.chat_id.ok_or(BotError::MissingChatId)
    }
}

/// Task queue double that records every submitted task.
pub struct RecordingQueue {
    pub tasks: Arc<Mutex<Vec<QueueTask>>>,
}

struct RecordingClient {
    tasks: Arc<Mutex<Vec<QueueTask>>>,
}

#[async_trait]
impl TaskQueue for RecordingQueue {
    async fn connect(&self) -> Result<Box<dyn QueueClient>, QueueError> {
        Ok(Box::new(RecordingClient {
            tasks: self.tasks.clone(),
        }))
    }
}

#[async_trait]
impl QueueClient for RecordingClient {
    async fn create_task(&self, task: QueueTask) -> Result<String, QueueError> {
        let name = format!("{}/tasks/{}", task.queue_path, self.tasks.lock().unwrap().len());
        self.tasks.lock().unwrap().push(task);
        Ok(name)
    }
}

/// Classifier double: returns a fixed result and records the prompts.
pub struct StubClassifier {
    result: Option<Classification>,
    pub prompts: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(&self, system_prompt: &str, user_prompt: &str) -> Option<Classification> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        self.result.clone()
    }
}

/// Shortener double: records the deep links it is asked to shorten.
pub struct StubShortener {
    fail: bool,
    pub seen: Mutex<Vec<String>>,
}

#[async_trait]
impl UrlShortener for StubShortener {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        self.seen.lock().unwrap().push(url.to_string());
        if self.fail {
            Err(ShortenError::NoServices)
        } else {
            Ok("https://sho.rt/abc123".into())
        }
    }
}

fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        telegram: TelegramSettings {
            bot_token: "123:test".into(),
            chat_id: Some(TEST_CHAT_ID),
            api_base: "https://api.telegram.org".into(),
        },
        classifier: ClassifierSettings {
            api_key: "test".into(),
            api_url: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4o".into(),
        },
        shortener: ShortenerSettings {
            shortio: ShortIoSettings {
                api_key: "test".into(),
                domain: "links.example.com".into(),
                api_url: "https://api.short.io/links".into(),
            },
            bitly: BitlySettings {
                api_key: "test".into(),
                api_url: "https://api-ssl.bitly.com/v4/shorten".into(),
            },
        },
        tasks: TaskSettings {
            project_id: "expense-bot".into(),
            location_id: "europe-west1".into(),
            message_queue: "messages".into(),
            transaction_queue: "transactions".into(),
            callback_base: "https://bot.example.com".into(),
            api_base: "https://cloudtasks.googleapis.com/v2".into(),
            auth_token: None,
        },
        accounts: AccountSettings {
            cash: "Cash".into(),
            default_bank: "MonobankUAH".into(),
            names: HashMap::from([("WKl9I-LztrH1ZWeafLZEzQ".to_string(), "MonobankEUR".to_string())]),
        },
        environment: "test".into(),
    }
}

/// The application wired with test doubles.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub tasks: Arc<Mutex<Vec<QueueTask>>>,
    pub bot: Arc<RecordingBot>,
    pub shortener: Arc<StubShortener>,
    pub classifier: Arc<StubClassifier>,
}

/// Builder over the doubles' knobs.
pub struct TestAppBuilder {
    classification: Option<Classification>,
    chat_id: Option<i64>,
    shortener_fails: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            classification: Some(Classification {
                category: "Transport".into(),
                subcategory: "Taxi".into(),
                amount: -120.0,
            }),
            chat_id: Some(TEST_CHAT_ID),
            shortener_fails: false,
        }
    }
}

impl TestAppBuilder {
    pub fn classification(mut self, classification: Option<Classification>) -> Self {
        self.classification = classification;
        self
    }

    pub fn without_chat_id(mut self) -> Self {
        self.chat_id = None;
        self
    }

    pub fn failing_shortener(mut self) -> Self {
        self.shortener_fails = true;
        self
    }

    pub fn build(self) -> TestApp {
        let settings = test_settings();

        let bot = Arc::new(RecordingBot {
            chat_id: self.chat_id,
            sent: Mutex::new(Vec::new()),
        });
        let shortener = Arc::new(StubShortener {
            fail: self.shortener_fails,
            seen: Mutex::new(Vec::new()),
        });
        let tasks = Arc::new(Mutex::new(Vec::new()));
        let queue = RecordingQueue {
            tasks: tasks.clone(),
        };

        let classifier = Arc::new(StubClassifier {
            result: self.classification,
            prompts: Mutex::new(Vec::new()),
        });

        let dispatcher = Arc::new(Dispatcher::new(Arc::new(queue), &settings.tasks));
        let notifier = Arc::new(NotificationService::new(shortener.clone() as Arc<dyn UrlShortener>));

        let state = AppState {
            settings: Arc::new(settings),
            bot: bot.clone() as Arc<dyn BotTransport>,
            classifier: classifier.clone() as Arc<dyn Classifier>,
            notifier,
            dispatcher,
        };

        let server = TestServer::new(routes::create_router(state.clone())).unwrap();

        TestApp {
            server,
            state,
            tasks,
            bot,
            shortener,
            classifier,
        }
    }
}

impl TestApp {
    pub fn new() -> Self {
        TestAppBuilder::default().build()
    }

    /// Wait until `count` tasks have been recorded (background work).
    pub async fn wait_for_tasks(&self, count: usize) {
        for _ in 0..200 {
            if self.tasks.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!(
            "timed out waiting for {} tasks, saw {}",
            count,
            self.tasks.lock().unwrap().len()
        );
    }
}
