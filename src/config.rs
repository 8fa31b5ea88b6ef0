// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! Configuration for prompt-relay
//!
//! Credentials and model names live in an explicit [`Settings`] struct that
//! is passed to each client at construction time. Values resolve from the
//! environment variable named in each `*_env` field first, then from the
//! directly stored field.

use serde::{Deserialize, Serialize};

/// Top-level settings passed to every client constructor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Per-provider configuration
    #[serde(default)]
    pub providers: ProviderSettings,
}

/// Configuration for all supported providers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub openai: OpenAiSettings,

    #[serde(default)]
    pub anthropic: AnthropicSettings,
}

/// OpenAI-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSettings {
    /// API key (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name for API key
    #[serde(default = "default_openai_api_key_env")]
    pub api_key_env: String,

    /// Model identifier (if stored directly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable name for the model identifier
    #[serde(default = "default_openai_model_env")]
    pub model_env: String,

    /// Base URL for API (for custom endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_openai_api_key_env(),
            model: None,
            model_env: default_openai_model_env(),
            base_url: None,
        }
    }
}

/// Anthropic-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicSettings {
    /// API key (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name for API key
    #[serde(default = "default_anthropic_api_key_env")]
    pub api_key_env: String,

    /// Model identifier (if stored directly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable name for the model identifier
    #[serde(default = "default_anthropic_model_env")]
    pub model_env: String,

    /// Base URL for API (for custom endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_anthropic_api_key_env(),
            model: None,
            model_env: default_anthropic_model_env(),
            base_url: None,
        }
    }
}

fn default_openai_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_model_env() -> String {
    "OPENAI_MODEL".to_string()
}

fn default_anthropic_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_anthropic_model_env() -> String {
    "ANTHROPIC_MODEL".to_string()
}

impl Settings {
    /// Get the API key for OpenAI, checking env var first.
    pub fn get_openai_api_key(&self) -> Option<String> {
        // Priority: env var > stored field.
        std::env::var(&self.providers.openai.api_key_env)
            .ok()
            .or_else(|| self.providers.openai.api_key.clone())
    }

    /// Get the model identifier for OpenAI, checking env var first.
    pub fn get_openai_model(&self) -> Option<String> {
        std::env::var(&self.providers.openai.model_env)
            .ok()
            .or_else(|| self.providers.openai.model.clone())
    }

    /// Get the API key for Anthropic, checking env var first.
    pub fn get_anthropic_api_key(&self) -> Option<String> {
        std::env::var(&self.providers.anthropic.api_key_env)
            .ok()
            .or_else(|| self.providers.anthropic.api_key.clone())
    }

    /// Get the model identifier for Anthropic, checking env var first.
    pub fn get_anthropic_model(&self) -> Option<String> {
        std::env::var(&self.providers.anthropic.model_env)
            .ok()
            .or_else(|| self.providers.anthropic.model.clone())
    }
}
