// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! Provider client implementations

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
