//! museum-hunt CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use museum_hunt::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; HF_TOKEN may come from the real environment
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so `generate` output stays clean)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse and execute CLI
    let cli = Cli::parse();
    cli.execute().await
}
