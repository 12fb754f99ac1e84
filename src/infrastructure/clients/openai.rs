//! OpenAI chat-completions classifier client.
//!
//! The model is forced onto a strict JSON schema so the response content is
//! exactly the classification triple. Any transport or parse failure yields
//! an absent classification, never an error that aborts the pipeline.

use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::application::services::Classifier;
use crate::config::ClassifierSettings;
use crate::domain::Classification;

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// OpenAI-compatible chat-completions adapter.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(settings: &ClassifierSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    async fn request(&self, body: Value) -> Result<Classification, String> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| format!("request failed: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("status {status}: {text}"));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| format!("undecodable response: {err}"))?;

        parse_completion(&completion)
    }
}

#[async_trait]
impl Classifier for OpenAiClient {
    async fn classify(&self, system_prompt: &str, user_prompt: &str) -> Option<Classification> {
        let started = Instant::now();

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "expense_classification",
                    "description": "Translates free input into: Category, Subcategory, Amount",
                    "strict": true,
                    "schema": classification_schema(),
                },
            },
        });

        let result = self.request(body).await;
        info!(duration = ?started.elapsed(), "classifier request finished");

        match result {
            Ok(classification) => Some(classification),
            Err(err) => {
                warn!(error = %err, "classification failed");
                None
            }
        }
    }
}

/// Strict response schema for the classification triple.
fn classification_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "category": { "type": "string" },
            "subcategory": { "type": "string" },
            "amount": { "type": "number" },
        },
        "required": ["category", "subcategory", "amount"],
        "additionalProperties": false,
    })
}

fn parse_completion(completion: &ChatCompletionResponse) -> Result<Classification, String> {
    let choice = completion
        .choices
        .first()
        .ok_or_else(|| "no choices in response".to_string())?;

    serde_json::from_str(&choice.message.content)
        .map_err(|err| format!("unparsable classification: {err}"))
}
