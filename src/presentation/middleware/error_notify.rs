//! Error-notification response middleware.
//!
//! Observes the status written to the client and, on a server error,
//! opportunistically schedules an out-of-band operator notification. This
//! gives passive visibility into failures without an external monitoring
//! system. At most one notification is sent per request: handlers that have
//! already reported (e.g. the missing-MCC case) insert the [`ErrorNotified`]
//! marker into their response extensions.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use chrono::Utc;
use tower::{Layer, Service};
use tracing::{info, warn};

use crate::domain::ScheduledMessage;
use crate::startup::AppState;

/// Marker extension: an error notification was already sent for this
/// response.
#[derive(Clone, Copy, Debug)]
pub struct ErrorNotified;

/// Generic operator message for unexpected server errors.
pub const SERVER_ERROR_TEXT: &str = "❌ [Mono] POST 500 error: Internal server error occurred";

/// Layer that reports 5xx responses to the configured chat.
#[derive(Clone)]
pub struct ErrorNotifyLayer {
    state: AppState,
}

impl ErrorNotifyLayer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl<S> Layer<S> for ErrorNotifyLayer {
    type Service = ErrorNotifyMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorNotifyMiddleware {
            inner,
            state: self.state.clone(),
        }
    }
}

/// Middleware that inspects outbound responses.
#[derive(Clone)]
pub struct ErrorNotifyMiddleware<S> {
    inner: S,
    state: AppState,
}

impl<S> Service<Request<Body>> for ErrorNotifyMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let state = self.state.clone();
        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;

            if response.status().is_server_error()
                && response.extensions().get::<ErrorNotified>().is_none()
            {
                notify(&state).await;
                response.extensions_mut().insert(ErrorNotified);
            }

            Ok(response)
        })
    }
}

async fn notify(state: &AppState) {
    let chat_id = match state.bot.default_chat_id() {
        Ok(chat_id) => chat_id,
        Err(err) => {
            warn!(error = %err, "cannot report server error: no chat id");
            return;
        }
    };

    let session = state.dispatcher.connect().await;
    session
        .schedule_message(
            &ScheduledMessage {
                chat_id,
                text: SERVER_ERROR_TEXT.into(),
                reply_to_message_id: None,
            },
            Utc::now(),
        )
        .await;
    info!("scheduled notification for server error");
}
