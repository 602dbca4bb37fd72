//! nyaya - terminal client for the Nyaya legal-aid assistant

use anyhow::{Context as _, Result};
use clap::Parser;
use nyaya_common::config::{load_default_toml_config, load_toml_config};
use nyaya_ui::cli::{self, Cli, Context};
use nyaya_ui::render::Renderer;
use nyaya_ui::ApiClient;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    let renderer = Renderer::new(args.no_color);

    if let Err(e) = run(args, renderer).await {
        eprintln!("{}", renderer.error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

async fn run(args: Cli, renderer: Renderer) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_toml_config(path).context("Failed to load config file")?,
        None => load_default_toml_config(),
    };

    // Quiet by default so command output stays readable
    let default_filter = config
        .log_level
        .clone()
        .unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let api_url = args.api_url.unwrap_or(config.client.api_url);
    debug!("Using API at {}", api_url);

    let ctx = Context {
        client: ApiClient::new(api_url)?,
        renderer,
    };

    cli::run(args.command, &ctx).await
}
