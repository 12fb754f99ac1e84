//! Bitly shortening provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::services::{ShortenError, UrlShortener};
use crate::config::BitlySettings;

const PROVIDER: &str = "bitly";

#[derive(Debug, Serialize)]
struct BitlyRequest<'a> {
    long_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct BitlyResponse {
    link: String,
}

#[derive(Debug, Deserialize)]
struct BitlyErrorResponse {
    message: Option<String>,
}

/// Bitly v4 shorten API adapter.
pub struct BitlyClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl BitlyClient {
    pub fn new(settings: &BitlySettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
        }
    }
}

#[async_trait]
impl UrlShortener for BitlyClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&BitlyRequest { long_url: url })
            .send()
            .await
            .map_err(|err| ShortenError::Transport {
                provider: PROVIDER,
                message: err.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| ShortenError::Transport {
            provider: PROVIDER,
            message: err.to_string(),
        })?;

        if !status.is_success() {
            // Prefer the API's message field when the body parses; keep the
            // raw body otherwise so the chain can still inspect it.
            let message = serde_json::from_str::<BitlyErrorResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.message)
                .unwrap_or(body);
            return Err(ShortenError::Provider {
                provider: PROVIDER,
                status: Some(status.as_u16()),
                body: message,
            });
        }

        let decoded: BitlyResponse =
            serde_json::from_str(&body).map_err(|err| ShortenError::Decode {
                provider: PROVIDER,
                message: err.to_string(),
            })?;

        Ok(decoded.link)
    }
}
