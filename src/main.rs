//! housing-predict - Main Entry Point

use clap::Parser;
use housing_predict::cli::{cmd_inspect, cmd_predict, cmd_serve, ArtifactArgs, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "housing_predict=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host, artifacts }) => {
            cmd_serve(host, port, &artifacts).await?;
        }
        Some(Commands::Predict { input, artifacts }) => {
            cmd_predict(&input, &artifacts)?;
        }
        Some(Commands::Inspect { artifacts }) => {
            cmd_inspect(&artifacts)?;
        }
        None => {
            // Default: serve with environment configuration
            cmd_serve(None, None, &ArtifactArgs::default()).await?;
        }
    }

    Ok(())
}
