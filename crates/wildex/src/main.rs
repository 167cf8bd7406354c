mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Download(args) => commands::download::run(args).await,
        Commands::Plan { input, selection } => commands::plan::run(&input, &selection),
        Commands::ResumeInfo { input } => commands::resume_info::run(&input),
        Commands::Version => commands::version::run(),
    }
}
