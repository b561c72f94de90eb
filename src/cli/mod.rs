//! CLI module for the industrial assistant
//!
//! Provides subcommands:
//! - `analyze`: analyse an existing answer and print the structured result
//! - `prompt`: print the system prompt for a domain or query
//! - `ask`: send a question to the configured LLM and analyse the answer

pub mod analyze;
pub mod ask;
pub mod prompt;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Industrial AI knowledge assistant - domain-aware answer analysis
#[derive(Parser)]
#[command(name = "industrial-assistant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyse an answer for domain, confidence, safety and hallucination risk
    Analyze(analyze::AnalyzeArgs),

    /// Print the system prompt used for a domain
    Prompt(prompt::PromptArgs),

    /// Ask the LLM a question and analyse its answer
    Ask(ask::AskArgs),
}

/// Load `.env`, read and validate configuration, then start logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    logging::init_logging(&config.logging);

    Ok(config)
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
