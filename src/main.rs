use anyhow::{Context, Result};
use clap::Parser;
use speech_gateway::{
    create_router, AppState, ArtifactStore, Config, Engines, GoogleCloudClient, RetentionPolicy,
    SpeechService,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// HTTP gateway for Google text-to-speech, speech-to-text and sentiment analysis
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file (extension optional, missing file is fine)
    #[arg(long, default_value = "config/speech-gateway")]
    config: String,

    /// Listen port; overrides the config file and PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut cfg = Config::load(&args.config)?;
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }
    cfg.validate().context("Invalid configuration")?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let client = GoogleCloudClient::from_config(&cfg)?;
    let engines = Engines::from_client(Arc::new(client));

    let store = ArtifactStore::open(&cfg.storage.uploads_path)?;
    let _sweeper = cfg.retention().map(|max_age| {
        store.spawn_sweeper(RetentionPolicy::max_age(max_age), cfg.sweep_interval())
    });

    let app = create_router(AppState::new(SpeechService::new(engines, store)));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
