//! kortek-catalog - anime catalog API
//!
//! Serves scored catalog data (home page, details, schedules, search, lists)
//! from a cache-aside store in front of the configured upstream source.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kortek_catalog::cache::CacheStore;
use kortek_catalog::source::build_source;
use kortek_catalog::{AppState, CatalogService};
use kortek_common::config::ConfigResolver;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for kortek-catalog
#[derive(Parser, Debug)]
#[command(name = "kortek-catalog")]
#[command(about = "Anime catalog API with validation and confidence scoring")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new(args.config.clone())
        .load()
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("kortek_catalog={0},kortek_common={0},tower_http={0}", config.logging.level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = args.port.unwrap_or(config.port);
    info!("Starting kortek-catalog on port {}", port);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        ttl_secs = config.cache.ttl_secs,
        long_ttl_secs = config.cache.long_ttl_secs,
        "Cache TTLs"
    );

    let catalog = build_source(&config.source)
        .context("Failed to initialize catalog source")?
        .map(|source| {
            CatalogService::new(
                source,
                CacheStore::new(config.cache.ttl()),
                config.scoring.into(),
                config.cache.clone(),
            )
        });
    if catalog.is_none() {
        warn!("No active catalog source, catalog endpoints will answer 503");
    }

    let app = kortek_catalog::build_router(AppState::new(catalog), &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
