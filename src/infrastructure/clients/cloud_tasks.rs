//! Google Cloud Tasks queue client.
//!
//! Speaks the Cloud Tasks REST surface: a task is a POST callback the queue
//! will invoke at-or-after its schedule time. `connect` hands out a
//! request-scoped session; dropping the session releases the HTTP handle.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use chrono::SecondsFormat;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::services::{QueueClient, QueueError, QueueTask, TaskQueue};
use crate::config::TaskSettings;

#[derive(Debug, Clone)]
struct CloudTasksConfig {
    api_base: String,
    auth_token: Option<String>,
}

/// Cloud Tasks REST adapter.
pub struct CloudTasksClient {
    config: CloudTasksConfig,
}

impl CloudTasksClient {
    pub fn new(settings: &TaskSettings) -> Self {
        Self {
            config: CloudTasksConfig {
                api_base: settings.api_base.clone(),
                auth_token: settings.auth_token.clone(),
            },
        }
    }
}

#[async_trait]
impl TaskQueue for CloudTasksClient {
    async fn connect(&self) -> Result<Box<dyn QueueClient>, QueueError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| QueueError::Transport(err.to_string()))?;

        Ok(Box::new(CloudTasksSession {
            http,
            config: self.config.clone(),
        }))
    }
}

struct CloudTasksSession {
    http: reqwest::Client,
    config: CloudTasksConfig,
}

#[derive(Debug, Deserialize)]
struct CreatedTask {
    name: String,
}

#[async_trait]
impl QueueClient for CloudTasksSession {
    async fn create_task(&self, task: QueueTask) -> Result<String, QueueError> {
        let url = format!(
            "{}/{}/tasks",
            self.config.api_base.trim_end_matches('/'),
            task.queue_path
        );

        let mut request = self.http.post(&url).json(&build_create_task_request(&task));
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| QueueError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueueError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedTask = response
            .json()
            .await
            .map_err(|err| QueueError::Transport(format!("undecodable response: {err}")))?;

        Ok(created.name)
    }
}

fn build_create_task_request(task: &QueueTask) -> Value {
    json!({
        "task": {
            "httpRequest": {
                "httpMethod": "POST",
                "url": task.url,
                "headers": { "Content-Type": "application/json" },
                "body": BASE64_STANDARD.encode(&task.body),
            },
            "scheduleTime": task.schedule_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        },
    })
}
