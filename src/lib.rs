// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! prompt-relay - forward a prompt to hosted LLM providers and extract the
//! reply text.
//!
//! Three independent leaf components:
//! - `providers::openai`: single-message chat-completions call returning the
//!   full response alongside the extracted text
//! - `providers::anthropic`: same contract against the Anthropic Messages API
//! - `analysis`: factory for a pre-configured client handle consumed by a
//!   tabular data-analysis engine
//!
//! Credentials and model names are passed in via an explicit
//! [`config::Settings`] struct rather than read from ambient process state
//! inside each call.

pub mod analysis;
pub mod config;
pub mod error;
pub mod providers;
pub mod utils;

pub use error::{RelayError, Result};
