use clap::Parser;
use industrial_assistant::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => cli::analyze::run(args).await,
        Command::Prompt(args) => cli::prompt::run(args).await,
        Command::Ask(args) => cli::ask::run(args).await,
    }
}
