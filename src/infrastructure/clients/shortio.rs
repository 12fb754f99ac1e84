//! Short.io shortening provider.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::application::services::{ShortenError, UrlShortener};
use crate::config::ShortIoSettings;

const PROVIDER: &str = "short.io";

#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    domain: &'a str,
    #[serde(rename = "originalURL")]
    original_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ShortenResponse {
    #[serde(rename = "shortURL")]
    short_url: String,
}

/// Short.io links API adapter.
pub struct ShortIoClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    domain: String,
}

impl ShortIoClient {
    pub fn new(settings: &ShortIoSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            domain: settings.domain.clone(),
        }
    }
}

#[async_trait]
impl UrlShortener for ShortIoClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        let request = ShortenRequest {
            domain: &self.domain,
            original_url: url,
        };

        let response = self
            .http
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ShortenError::Transport {
                provider: PROVIDER,
                message: err.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            // Body preserved verbatim: the fallback chain inspects it for
            // the quota-exhaustion signal.
            let body = response.text().await.unwrap_or_default();
            return Err(ShortenError::Provider {
                provider: PROVIDER,
                status: Some(status.as_u16()),
                body,
            });
        }

        let decoded: ShortenResponse =
            response.json().await.map_err(|err| ShortenError::Decode {
                provider: PROVIDER,
                message: err.to_string(),
            })?;

        Ok(decoded.short_url)
    }
}
