//! URL shortening chain-of-responsibility.
//!
//! An ordered list of interchangeable providers tried until one succeeds.
//! Order is fixed at construction and defines priority (cheapest/preferred
//! first); `add_service` appends to the end only.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Quota-exhaustion message Short.io embeds in its 402 response body.
pub const QUOTA_LIMIT_MESSAGE: &str = "You are out of your account link or domain limit";

/// URL shortening capability. Providers are stateless and safe to share
/// across concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlShortener: Send + Sync {
    /// Provider name for logging and error attribution.
    fn name(&self) -> &'static str;

    /// Shorten a long URL.
    async fn shorten(&self, url: &str) -> Result<String, ShortenError>;
}

/// Shortening failure taxonomy.
///
/// `Provider` keeps the upstream response body verbatim so the chain can
/// recognize quota errors by inspecting it.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    /// The provider answered with a non-success status.
    #[error("failed to shorten URL: {body}")]
    Provider {
        provider: &'static str,
        status: Option<u16>,
        body: String,
    },

    /// The request never produced a usable response.
    #[error("{provider} request failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    /// The provider answered 2xx but the body was not the expected shape.
    #[error("{provider} returned an undecodable response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    /// Every provider in the chain failed.
    #[error("all services failed, last error: {last}")]
    Exhausted { last: Box<ShortenError> },

    /// The chain has no providers configured.
    #[error("no shortening services configured")]
    NoServices,
}

/// Tries each provider in priority order until one succeeds.
pub struct FallbackShortener {
    services: Vec<Arc<dyn UrlShortener>>,
}

impl FallbackShortener {
    pub fn new(services: Vec<Arc<dyn UrlShortener>>) -> Self {
        Self { services }
    }

    /// Append a provider to the end of the chain.
    pub fn add_service(&mut self, service: Arc<dyn UrlShortener>) {
        self.services.push(service);
    }

    /// Number of configured providers.
    pub fn service_count(&self) -> usize {
        self.services.len()
    }
}

#[async_trait]
impl UrlShortener for FallbackShortener {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        let mut last_err: Option<ShortenError> = None;

        for (position, service) in self.services.iter().enumerate() {
            debug!(service = service.name(), position = position + 1, "trying shortening service");

            match service.shorten(url).await {
                Ok(short_url) => {
                    info!(service = service.name(), url = %short_url, "shortening service succeeded");
                    return Ok(short_url);
                }
                Err(err) => {
                    if should_fall_back(&err) {
                        info!(service = service.name(), error = %err, "service hit its quota, trying next service");
                    } else {
                        // Every failure falls through to the next service,
                        // not only quota errors.
                        warn!(service = service.name(), error = %err, "service failed, trying next service");
                    }
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(last) => Err(ShortenError::Exhausted { last: Box::new(last) }),
            None => Err(ShortenError::NoServices),
        }
    }
}

/// Whether a provider failure is a quota/payment-required signal.
///
/// Recognized as a typed HTTP 402, the well-known limit message, or a
/// best-effort JSON `statusCode: 402` recovered from the response body.
fn should_fall_back(err: &ShortenError) -> bool {
    let ShortenError::Provider { status, body, .. } = err else {
        return false;
    };
    if *status == Some(402) {
        return true;
    }
    body_indicates_quota(body)
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(rename = "statusCode")]
    status_code: Option<u16>,
}

fn body_indicates_quota(body: &str) -> bool {
    if body.contains(QUOTA_LIMIT_MESSAGE) {
        return true;
    }

    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(parsed) => parsed.status_code == Some(402),
        // Not JSON at all; fall back to raw string matching.
        Err(_) => body.contains(r#""statusCode":402"#) || body.contains(r#"\"statusCode\":402"#),
    }
}
