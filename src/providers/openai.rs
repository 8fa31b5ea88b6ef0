// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! OpenAI chat-completions client
//!
//! Sends a single user message and returns the full completion object
//! together with the extracted text of the first choice.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{ApiError, RelayError, Result};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions client
#[derive(Debug)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
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
        let api_key = settings.get_openai_api_key().ok_or_else(|| {
            RelayError::Config(format!(
                "No OpenAI API key found. Set {}.",
                settings.providers.openai.api_key_env
            ))
        })?;

        let model = settings.get_openai_model().ok_or_else(|| {
            RelayError::Config(format!(
                "No OpenAI model configured. Set {}.",
                settings.providers.openai.model_env
            ))
        })?;

        Ok(if let Some(ref base_url) = settings.providers.openai.base_url {
            Self::with_base_url(api_key, model, base_url)
        } else {
            Self::new(api_key, model)
        })
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for a single-message prompt
    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
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
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorEnvelope>(body) {
            let message = error_response.error.message;
            let code = error_response.error.code.as_deref().unwrap_or("");

            match code {
                "invalid_api_key" | "authentication_error" => {
                    RelayError::Api(ApiError::AuthenticationFailed)
                }
                "rate_limit_exceeded" => {
                    let retry_secs = retry_after
                        .map(|s| u32::try_from(s).unwrap_or(u32::MAX))
                        .unwrap_or(60);
                    RelayError::Api(ApiError::RateLimited(retry_secs))
                }
                "model_not_found" => RelayError::Api(ApiError::ModelNotFound(message)),
                _ => RelayError::Api(ApiError::ServerError { status, message }),
            }
        } else {
            RelayError::Api(ApiError::ServerError {
                status,
                message: body.to_string(),
            })
        }
    }

    /// Send a prompt and return the full completion plus its extracted text
    pub async fn complete(&self, prompt: &str) -> Result<(ChatCompletion, String)> {
        let body = self.build_request(prompt);

        tracing::debug!(model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
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

        let completion: ChatCompletion = response.json().await?;
        let content = extract_content(&completion)?;

        tracing::debug!(chars = content.len(), "extracted completion text");

        Ok((completion, content))
    }
}

/// Extract the text of the first choice's message
fn extract_content(completion: &ChatCompletion) -> Result<String> {
    let choice = completion.choices.first().ok_or_else(|| {
        RelayError::Api(ApiError::InvalidResponse(
            "response contained no choices".to_string(),
        ))
    })?;

    choice.message.content.clone().ok_or_else(|| {
        RelayError::Api(ApiError::InvalidResponse(
            "first choice contained no content".to_string(),
        ))
    })
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
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

/// Full completion object returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorEnvelope {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}
