use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mlserve::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.settings.resolve()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mlserve={},tower_http=debug", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Logging configured at {} level", config.log_level);

    match cli.command {
        Commands::Serve { host, port } => {
            mlserve::cli::serve(config, host, port).await?;
        }
        Commands::Predict { features, input } => {
            mlserve::cli::predict(config, features, input).await?;
        }
    }

    Ok(())
}
