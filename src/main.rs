// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 prompt-relay contributors

//! prompt-relay demonstration entry point
//!
//! Forwards one prompt to OpenAI and Anthropic in sequence, prints each
//! extracted reply and its paragraph chunks, then constructs the analysis
//! client handle.

use clap::Parser;

use prompt_relay::analysis::AnalysisClient;
use prompt_relay::config::Settings;
use prompt_relay::error::Result;
use prompt_relay::providers::{AnthropicClient, OpenAiClient};
use prompt_relay::utils::split_paragraphs;

/// Prompt used when none is given on the command line
const DEFAULT_PROMPT: &str =
    "Explain, in two short paragraphs, what a large language model is.";

#[derive(Parser)]
#[command(name = "prompt-relay", version, about = "Forward a prompt to hosted LLM providers")]
struct Cli {
    /// Prompt to forward to each provider
    prompt: Option<String>,

    /// Enable debug logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` enables crate diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        if let Ok(directive) = "prompt_relay=debug".parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = Settings::default();
    let prompt = cli.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());

    let openai = OpenAiClient::from_settings(&settings)?;
    let (completion, content) = openai.complete(&prompt).await?;
    println!("=== OpenAI ({}) ===", completion.model);
    println!("{content}");
    print_paragraphs(&content);

    let anthropic = AnthropicClient::from_settings(&settings)?;
    let (message, content) = anthropic.complete(&prompt).await?;
    println!("=== Anthropic ({}) ===", message.model);
    println!("{content}");
    print_paragraphs(&content);

    let analysis = AnalysisClient::from_settings(&settings)?;
    tracing::info!(
        base_url = %analysis.base_url(),
        model = ?analysis.model(),
        "analysis client ready"
    );

    Ok(())
}

/// Print the paragraph-like chunks of a reply, one per line
fn print_paragraphs(content: &str) {
    for (i, paragraph) in split_paragraphs(content).iter().enumerate() {
        println!("[paragraph {}] {}", i + 1, paragraph);
    }
}
