//! nyaya-api - REST backend for the Nyaya legal-aid assistant
//!
//! Zero-config startup: the root folder and database are created on first
//! run, and speech endpoints answer 503 until an engine URL is configured.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nyaya_api::speech::SpeechServices;
use nyaya_api::{build_router, AppState, HttpSettings};
use nyaya_common::config::{
    load_default_toml_config, load_toml_config, RootFolderInitializer, RootFolderResolver,
};
use nyaya_common::db::init_database;
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for nyaya-api
#[derive(Parser, Debug)]
#[command(name = "nyaya-api")]
#[command(about = "REST backend for the Nyaya legal-aid assistant")]
#[command(version)]
struct Args {
    /// Root folder holding nyaya.db
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, env = "NYAYA_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "NYAYA_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "NYAYA_PORT")]
    port: Option<u16>,

    /// Whisper-compatible transcription endpoint
    #[arg(long, env = "NYAYA_STT_URL")]
    stt_url: Option<String>,

    /// Text-to-speech endpoint
    #[arg(long, env = "NYAYA_TTS_URL")]
    tts_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_toml_config(path).context("Failed to load config file")?,
        None => load_default_toml_config(),
    };

    let default_filter = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    info!("Starting Nyaya API (nyaya-api) v{}", env!("CARGO_PKG_VERSION"));

    // Command line and environment override the config file
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.stt_url.is_some() {
        config.speech.stt_url = args.stt_url;
    }
    if args.tts_url.is_some() {
        config.speech.tts_url = args.tts_url;
    }

    let mut resolver = RootFolderResolver::new("nyaya-api").with_cli_arg(args.root_folder);
    if let Some(path) = &args.config {
        resolver = resolver.with_config_file(path);
    }
    let initializer = RootFolderInitializer::new(resolver.resolve());
    info!("Root folder: {}", initializer.root_folder().display());
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path)
        .await
        .context("Failed to open database")?;

    let speech = SpeechServices::from_config(&config.speech)
        .context("Failed to configure speech providers")?;
    match &config.speech.stt_url {
        Some(url) => info!("Speech-to-text: {} ({})", speech.stt.name(), url),
        None => warn!("Speech-to-text not configured; voice endpoints will answer 503"),
    }
    match &config.speech.tts_url {
        Some(url) => info!("Text-to-speech: {} ({})", speech.tts.name(), url),
        None => warn!("Text-to-speech not configured; /api/text-to-speech will answer 503"),
    }

    let state = AppState::new(pool, speech).with_settings(HttpSettings::from(&config.server));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_addr, config.server.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("nyaya-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
