//! Deferred task dispatching.
//!
//! Notifications are not sent inline: handlers hand them to an external
//! durable queue as POST callbacks into this service's own delivery
//! endpoints. The webhook response never depends on whether that hand-off
//! succeeded; upstream systems retrying on non-2xx must not be made to
//! retry because a downstream notification failed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::TaskSettings;
use crate::domain::{ScheduledMessage, ScheduledTransaction};

/// Queue submission failure.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue transport error: {0}")]
    Transport(String),

    #[error("queue rejected task: status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A task description submitted to the external queue: invoke `url` with a
/// POST of `body` at-or-after `schedule_at`. No ordering is guaranteed
/// between tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueTask {
    pub queue_path: String,
    pub url: String,
    pub body: Vec<u8>,
    pub schedule_at: DateTime<Utc>,
}

/// Durable queue factory; `connect` acquires a request-scoped client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQueue: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn QueueClient>, QueueError>;
}

/// A connected queue handle. Dropping it releases the underlying resources
/// on every exit path, early returns and panics included.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Submit one task; returns the queue-assigned task name.
    async fn create_task(&self, task: QueueTask) -> Result<String, QueueError>;
}

/// Queue-path and callback-URL derivation from configuration.
#[derive(Debug, Clone)]
struct TaskRoutes {
    project_id: String,
    location_id: String,
    message_queue: String,
    transaction_queue: String,
    callback_base: String,
}

impl TaskRoutes {
    fn queue_path(&self, queue: &str) -> String {
        format!(
            "projects/{}/locations/{}/queues/{}",
            self.project_id, self.location_id, queue
        )
    }

    fn callback_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.callback_base.trim_end_matches('/'), endpoint)
    }
}

/// Schedules notifications for asynchronous delivery.
pub struct Dispatcher {
    queue: Arc<dyn TaskQueue>,
    routes: TaskRoutes,
}

impl Dispatcher {
    pub fn new(queue: Arc<dyn TaskQueue>, settings: &TaskSettings) -> Self {
        Self {
            queue,
            routes: TaskRoutes {
                project_id: settings.project_id.clone(),
                location_id: settings.location_id.clone(),
                message_queue: settings.message_queue.clone(),
                transaction_queue: settings.transaction_queue.clone(),
                callback_base: settings.callback_base.clone(),
            },
        }
    }

    /// Acquire a request-scoped session.
    ///
    /// A connection failure degrades the session to a logging no-op: the
    /// request that asked for it must still succeed.
    pub async fn connect(&self) -> DispatcherSession {
        let client = match self.queue.connect().await {
            Ok(client) => Some(client),
            Err(err) => {
                warn!(error = %err, "could not connect to task queue; deferred notifications will be skipped");
                None
            }
        };
        DispatcherSession {
            routes: self.routes.clone(),
            client,
        }
    }
}

/// Request-scoped dispatching session. Scheduling is best-effort: failures
/// are logged and swallowed, never propagated to the HTTP caller.
pub struct DispatcherSession {
    routes: TaskRoutes,
    client: Option<Box<dyn QueueClient>>,
}

impl DispatcherSession {
    /// Schedule a chat message for delivery at-or-after `not_before`.
    pub async fn schedule_message(&self, message: &ScheduledMessage, not_before: DateTime<Utc>) {
        let queue_path = self.routes.queue_path(&self.routes.message_queue);
        let url = self.routes.callback_url("messages");
        self.schedule("message", queue_path, url, message, not_before).await;
    }

    /// Schedule a bank transaction for classification and delivery.
    pub async fn schedule_transaction(
        &self,
        transaction: &ScheduledTransaction,
        not_before: DateTime<Utc>,
    ) {
        let queue_path = self.routes.queue_path(&self.routes.transaction_queue);
        let url = self.routes.callback_url("transactions");
        self.schedule("transaction", queue_path, url, transaction, not_before)
            .await;
    }

    async fn schedule<T: Serialize>(
        &self,
        kind: &str,
        queue_path: String,
        url: String,
        payload: &T,
        not_before: DateTime<Utc>,
    ) {
        let Some(client) = self.client.as_ref() else {
            warn!(kind, "no queue client, skipping deferred delivery");
            return;
        };

        let body = match serde_json::to_vec(payload) {
            Ok(body) => body,
            Err(err) => {
                error!(kind, error = %err, "could not serialize task payload");
                return;
            }
        };

        let task = QueueTask {
            queue_path,
            url,
            body,
            schedule_at: not_before,
        };

        match client.create_task(task).await {
            Ok(name) => info!(kind, task = %name, "task scheduled"),
            Err(err) => error!(kind, error = %err, "could not schedule task"),
        }
    }
}
