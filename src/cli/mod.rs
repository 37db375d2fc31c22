//! Command-line interface for museum-hunt.
//!
//! Provides commands for generating a hunt in the terminal, serving the
//! web form, listing the roles, and checking the model service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{HuggingFaceAdapter, LanguageModel};
use crate::config::{load_config, ResolvedConfig};
use crate::core::{generate_hunt, ConsoleProgress, HuntReport, Orchestrator};
use crate::domain::{HuntRequest, DEFAULT_ITEM_COUNT, ROLES};
use crate::server;

/// museum-hunt - Museum scavenger hunt generator
#[derive(Parser, Debug)]
#[command(name = "museum-hunt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a scavenger hunt and print it as Markdown
    Generate {
        /// Museum name (e.g. "El Prado")
        museum: String,

        /// Number of artworks (5-30, in steps of 5)
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITEM_COUNT)]
        items: u32,
    },

    /// Serve the web form
    Serve {
        /// Address to bind to (overrides configuration)
        #[arg(short, long)]
        address: Option<String>,
    },

    /// List the roles taking part in generation
    Roles,

    /// Check that the model service accepts the configured credential
    Check,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Roles => {
                show_roles();
                Ok(())
            }
            command => {
                // Missing credentials stop the process here, before any work starts
                let config = load_config()?;
                execute_configured(command, &config).await
            }
        }
    }
}

async fn execute_configured(command: Commands, config: &ResolvedConfig) -> Result<()> {
    match command {
        Commands::Generate { museum, items } => generate(config, museum, items).await,
        Commands::Serve { address } => {
            let address = address.unwrap_or_else(|| config.server.address.clone());
            server::serve(&address, build_orchestrator(config)?).await
        }
        Commands::Check => check(config).await,
        Commands::Config => {
            show_config(config);
            Ok(())
        }
        Commands::Roles => {
            show_roles();
            Ok(())
        }
    }
}

/// Build the production orchestrator from configuration
pub fn build_orchestrator(config: &ResolvedConfig) -> Result<Arc<Orchestrator>> {
    let model = HuggingFaceAdapter::new(&config.model, config.api_token.expose())
        .context("Failed to create Hugging Face adapter")?;

    Ok(Arc::new(Orchestrator::new(Arc::new(model))))
}

async fn generate(config: &ResolvedConfig, museum: String, items: u32) -> Result<()> {
    let request = HuntRequest::from_form(museum, items)?;
    let orchestrator = build_orchestrator(config)?;

    let mut progress = ConsoleProgress;
    match generate_hunt(orchestrator, request, &mut progress).await {
        HuntReport::Completed(markdown) => {
            println!("{}", markdown);
            Ok(())
        }
        report => anyhow::bail!("{}", report),
    }
}

fn show_roles() {
    for (i, role) in ROLES.iter().enumerate() {
        println!("{}. {}", i + 1, role.name);
        println!("   Goal: {}", role.goal);
    }
}

async fn check(config: &ResolvedConfig) -> Result<()> {
    let model = HuggingFaceAdapter::new(&config.model, config.api_token.expose())?;

    model
        .health_check()
        .await
        .with_context(|| format!("Model service check failed for {}", config.model.api_base))?;

    println!("OK: {} ({})", model.model_id(), config.model.api_base);
    Ok(())
}

fn show_config(config: &ResolvedConfig) {
    let config_file = config
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!("Config file:  {}", config_file);
    println!("Model:        {}", config.model.model);
    println!("API base:     {}", config.model.api_base);
    println!("Timeout:      {}s", config.model.timeout_seconds);
    println!("Max tokens:   {}", config.model.max_tokens);
    println!("Temperature:  {}", config.model.temperature);
    println!("Server:       {}", config.server.address);
    println!("Token:        {}", config.api_token.redacted());
}
