// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! Anthropic Messages API client
//!
//! Same contract as the OpenAI client against the Anthropic schema: a
//! single user message, a fixed output-token cap, and extraction of the
//! first content block's text.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{ApiError, RelayError, Result};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Output-token cap sent with every request
const MAX_TOKENS: u32 = 4096;

/// Anthropic Messages API client
#[derive(Debug)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new Anthropic client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Create with a custom base URL
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Create a client from settings, resolving credentials and model
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.get_anthropic_api_key().ok_or_else(|| {
            RelayError::Config(format!(
                "No Anthropic API key found. Set {}.",
                settings.providers.anthropic.api_key_env
            ))
        })?;

        let model = settings.get_anthropic_model().ok_or_else(|| {
            RelayError::Config(format!(
                "No Anthropic model configured. Set {}.",
                settings.providers.anthropic.model_env
            ))
        })?;

        Ok(
            if let Some(ref base_url) = settings.providers.anthropic.base_url {
                Self::with_base_url(api_key, model, base_url)
            } else {
                Self::new(api_key, model)
            },
        )
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for a single-message prompt
    fn build_request(&self, prompt: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![RequestMessage {
                role: "user".to_string(),
                content: vec![ContentPart::Text {
                    text: prompt.to_string(),
                }],
            }],
        }
    }

    /// Parse numeric Retry-After header (seconds).
    fn extract_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
        headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    }

    /// Parse an error response
    fn parse_error(&self, status: u16, body: &str, retry_after: Option<u64>) -> RelayError {
        if let Ok(error_response) = serde_json::from_str::<AnthropicErrorEnvelope>(body) {
            match error_response.error.error_type.as_str() {
                "authentication_error" => RelayError::Api(ApiError::AuthenticationFailed),
                "rate_limit_error" => {
                    // Use Retry-After header if available, otherwise default to 10 seconds
                    let retry_secs = retry_after
                        .map(|s| u32::try_from(s).unwrap_or(u32::MAX))
                        .unwrap_or(10);
                    RelayError::Api(ApiError::RateLimited(retry_secs))
                }
                "not_found_error" => {
                    RelayError::Api(ApiError::ModelNotFound(error_response.error.message))
                }
                "invalid_request_error" => {
                    RelayError::Api(ApiError::InvalidResponse(error_response.error.message))
                }
                _ => RelayError::Api(ApiError::ServerError {
                    status,
                    message: error_response.error.message,
                }),
            }
        } else {
            RelayError::Api(ApiError::ServerError {
                status,
                message: body.to_string(),
            })
        }
    }

    /// Send a prompt and return the full message plus its extracted text
    pub async fn complete(&self, prompt: &str) -> Result<(MessageResponse, String)> {
        let body = self.build_request(prompt);

        tracing::debug!(model = %self.model, "sending messages request");

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            // Extract Retry-After header before consuming response body
            let retry_after = Self::extract_retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status, &body, retry_after));
        }

        let message: MessageResponse = response.json().await?;
        let content = extract_content(&message)?;

        tracing::debug!(chars = content.len(), "extracted message text");

        Ok((message, content))
    }
}

/// Extract the text of the first content block
fn extract_content(message: &MessageResponse) -> Result<String> {
    match message.content.first() {
        Some(ResponseContentBlock::Text { text }) => Ok(text.clone()),
        None => Err(RelayError::Api(ApiError::InvalidResponse(
            "response contained no content blocks".to_string(),
        ))),
    }
}

// Anthropic API types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
}

/// Full message object returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub model: String,
    pub content: Vec<ResponseContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<MessageUsage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseContentBlock {
    Text { text: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorEnvelope {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}
