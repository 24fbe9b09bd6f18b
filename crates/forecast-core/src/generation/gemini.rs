//! Gemini REST client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::model::{CompletionRequest, LanguageModel, ResponseFormat};
use crate::error::GenerationError;
use crate::storage::GenerationConfig;

pub struct GeminiClient {
    http_client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GenerationConfig, api_key: impl Into<String>) -> Result<Self, GenerationError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    fn url(&self) -> Result<Url, GenerationError> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        Url::parse(&raw).map_err(|e| GenerationError::InvalidEndpoint {
            url: raw.clone(),
            message: e.to_string(),
        })
    }

    fn body(request: &CompletionRequest) -> Value {
        let mut body = json!({
            "contents": [{ "parts": [{ "text": &request.prompt }] }],
        });
        let config = match request.response {
            ResponseFormat::Json => json!({
                "responseMimeType": "application/json",
                "responseSchema": plan_response_schema(),
            }),
            ResponseFormat::Text => json!({ "responseMimeType": "text/plain" }),
        };
        body["generationConfig"] = config;
        body
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        let url = self.url()?;
        debug!(model = %self.model, format = ?request.response, "gemini request");

        let resp = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::body(&request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "gemini request failed");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = resp.json().await?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Structured-output schema for a daily plan.
pub fn plan_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "schedule": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "time": { "type": "STRING" },
                        "task": { "type": "STRING" },
                        "priority": {
                            "type": "STRING",
                            "enum": ["critical", "high", "standard"],
                        },
                    },
                    "propertyOrdering": ["time", "task", "priority"],
                },
            },
            "goals": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
            },
            "journalPrompt": { "type": "STRING" },
        },
        "propertyOrdering": ["schedule", "goals", "journalPrompt"],
    })
}
