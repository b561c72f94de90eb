//! Ask command - full chat round trip against an OpenAI-compatible endpoint

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{ChatRequest, IndustrialDomain, ResponseQualityPipeline};
use crate::infrastructure::chat::ChatService;
use crate::infrastructure::conversation::InMemoryConversationRepository;
use crate::infrastructure::llm::{OpenAiProvider, ReqwestTransport};
use crate::infrastructure::retrieval::FixedSourceRetriever;

/// Arguments for the ask command
#[derive(Args, Clone, Debug)]
pub struct AskArgs {
    /// The question to ask
    pub message: String,

    /// JSON array of retrieved chunks to use as context
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Skip classification and use this domain
    #[arg(long)]
    pub domain: Option<IndustrialDomain>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Do not add retrieved context to the prompt
    #[arg(long)]
    pub no_rag: bool,
}

/// Run the ask command
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let service = build_service(&config, args.sources.as_deref()).await?;

    let mut request = ChatRequest::new(args.message).with_rag(!args.no_rag);
    if let Some(domain) = args.domain {
        request = request.with_domain_hint(domain);
    }
    if let Some(temperature) = args.temperature {
        request = request.with_temperature(temperature);
    }

    let response = service.process_message(request).await?;
    info!(
        conversation_id = %response.conversation_id,
        processing_time_ms = response.processing_time_ms,
        "Answer ready"
    );

    super::print_json(&response)
}

async fn build_service(
    config: &AppConfig,
    sources: Option<&Path>,
) -> anyhow::Result<ChatService> {
    let api_key = config
        .llm
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .context("No API key configured: set APP__LLM__API_KEY or OPENAI_API_KEY")?;

    let transport = ReqwestTransport::new(Duration::from_secs(config.llm.request_timeout_secs))?;
    let provider = OpenAiProvider::with_base_url(transport, api_key, &config.llm.base_url);
    let pipeline = ResponseQualityPipeline::new(&config.analysis)?;

    info!(model = %config.llm.model, base_url = %config.llm.base_url, "Using OpenAI provider");

    let mut service = ChatService::new(
        Arc::new(provider),
        Arc::new(InMemoryConversationRepository::new()),
        Arc::new(pipeline),
        config.chat_service_config(),
    );

    if let Some(path) = sources {
        service = service.with_retriever(Arc::new(FixedSourceRetriever::from_file(path).await?));
    }

    Ok(service)
}
