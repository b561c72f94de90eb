//! Prompt command - prints the system prompt for a domain

use clap::Args;
use tracing::info;

use crate::domain::{IndustrialDomain, ResponseQualityPipeline, build_system_prompt};

/// Arguments for the prompt command
#[derive(Args, Clone, Debug)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .args(["domain", "query"]),
))]
pub struct PromptArgs {
    /// Domain slug or label, e.g. `plc-programming`
    #[arg(long)]
    pub domain: Option<IndustrialDomain>,

    /// Classify this query and use its domain
    #[arg(long)]
    pub query: Option<String>,
}

/// Run the prompt command
pub async fn run(args: PromptArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let domain = match (args.domain, args.query) {
        (Some(domain), _) => domain,
        (None, Some(query)) => {
            let pipeline = ResponseQualityPipeline::new(&config.analysis)?;
            let domain = pipeline.classifier().classify(&query);
            info!(domain = %domain, "Query classified");
            domain
        }
        (None, None) => anyhow::bail!("either --domain or --query is required"),
    };

    print!("{}", build_system_prompt(domain));
    Ok(())
}
