// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! Utility functions for prompt-relay
//!
//! This module contains pure functions extracted from main.rs for testability.

/// Split text into paragraph-like chunks on blank lines
///
/// Chunks are trimmed; empty chunks are dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}
