//! Analyze command - runs the response-quality pipeline over a given answer

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::domain::{IndustrialDomain, ResponseQualityPipeline, SourceAttribution};
use crate::infrastructure::metrics::record_analysis;

/// Arguments for the analyze command
#[derive(Args, Clone, Debug)]
#[command(group(
    clap::ArgGroup::new("answer_source")
        .required(true)
        .args(["answer", "answer_file"]),
))]
pub struct AnalyzeArgs {
    /// The user's question
    #[arg(long, default_value = "")]
    pub query: String,

    /// Answer text to analyse
    #[arg(long)]
    pub answer: Option<String>,

    /// Read the answer text from a file
    #[arg(long)]
    pub answer_file: Option<PathBuf>,

    /// JSON array of source attributions the answer was generated from
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Model identifier (defaults to the configured model)
    #[arg(long)]
    pub model: Option<String>,

    /// Generation latency in milliseconds
    #[arg(long, default_value_t = 0.0)]
    pub latency_ms: f64,

    /// Skip classification and use this domain
    #[arg(long)]
    pub domain: Option<IndustrialDomain>,
}

/// Run the analyze command
pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let answer = match (&args.answer, &args.answer_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read answer from {}", path.display()))?,
        (None, None) => anyhow::bail!("either --answer or --answer-file is required"),
    };

    let sources = match &args.sources {
        Some(path) => load_sources(path).await?,
        None => Vec::new(),
    };

    let model = args.model.unwrap_or_else(|| config.llm.model.clone());
    let pipeline = ResponseQualityPipeline::new(&config.analysis)?;

    let response = match args.domain {
        Some(domain) => pipeline.analyze_with_domain(
            domain,
            &args.query,
            sources,
            &answer,
            &model,
            args.latency_ms,
        )?,
        None => pipeline.analyze(&args.query, sources, &answer, &model, args.latency_ms)?,
    };

    record_analysis(&response);
    info!(
        domain = %response.domain(),
        confidence = %response.confidence(),
        risk = %response.risk_level(),
        "Analysis complete"
    );

    super::print_json(&response)
}

async fn load_sources(path: &Path) -> anyhow::Result<Vec<SourceAttribution>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read sources from {}", path.display()))?;

    serde_json::from_str(&json)
        .with_context(|| format!("Invalid source attributions in {}", path.display()))
}
