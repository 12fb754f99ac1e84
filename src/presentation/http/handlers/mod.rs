//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints. Acceptance of an event is
//! always a 200 with body "OK", independent of whether the downstream
//! classification or shortening will succeed.

pub mod cash;
pub mod delivery;
pub mod health;
pub mod mono_webhook;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// The uniform acceptance response.
pub(crate) fn ok() -> Response {
    (StatusCode::OK, "OK").into_response()
}
