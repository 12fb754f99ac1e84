//! Route Configuration
//!
//! Configures all HTTP routes for the service.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::ErrorNotifyLayer;
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // The bank webhook gets the error-notification layer: its 5xx responses
    // are reported to the operator chat.
    let webhook = Router::new()
        .route(
            "/webhooks/monobank",
            get(handlers::mono_webhook::webhook_probe).post(handlers::mono_webhook::mono_webhook),
        )
        .layer(ErrorNotifyLayer::new(state.clone()));

    Router::new()
        // Inbound chat webhook
        .route("/cash", post(handlers::cash::cash_message))
        // Deferred-delivery callbacks invoked by the task queue
        .route("/messages", post(handlers::delivery::deliver_message))
        .route("/transactions", post(handlers::delivery::deliver_transaction))
        .merge(webhook)
        // Health check endpoint
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}
