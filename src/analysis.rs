// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! Client factory for the tabular data-analysis engine
//!
//! Builds a pre-configured OpenAI client handle that a downstream analysis
//! engine drives later. Construction performs no I/O; the only failure mode
//! is missing configuration.

use reqwest::Client;

use crate::config::Settings;
use crate::error::{RelayError, Result};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Pre-configured OpenAI client handle for the analysis engine
pub struct AnalysisClient {
    client: Client,
    api_token: String,
    model: Option<String>,
    base_url: String,
}

impl AnalysisClient {
    /// Create a handle from settings, resolving the API token
    ///
    /// The model is optional here: the analysis engine supplies its own
    /// default when none is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_token = settings.get_openai_api_key().ok_or_else(|| {
            RelayError::Config(format!(
                "No OpenAI API key found. Set {}.",
                settings.providers.openai.api_key_env
            ))
        })?;

        let base_url = settings
            .providers
            .openai
            .base_url
            .clone()
            .unwrap_or_else(|| OPENAI_API_BASE.to_string());

        Ok(Self {
            client: Client::new(),
            api_token,
            model: settings.get_openai_model(),
            base_url,
        })
    }

    /// The HTTP client the analysis engine should reuse
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// The configured API token
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// The configured model, if any
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// The API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
