//! repertorio - Song repertoire CRUD service
//!
//! Serves a JSON API (plus a small web page) over a repertoire of songs.
//! The whole collection lives in memory and is rewritten to a single JSON
//! file after every mutation.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use repertorio::store::RepertoireStore;
use repertorio::{build_router, AppState};

/// Command-line arguments for repertorio
#[derive(Parser, Debug)]
#[command(name = "repertorio")]
#[command(about = "Song repertoire CRUD service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "REPERTORIO_PORT")]
    port: u16,

    /// Path of the persisted repertoire file
    #[arg(
        short,
        long,
        default_value = "repertorio.json",
        env = "REPERTORIO_DATA_FILE"
    )]
    data_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting repertorio v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    info!("Data file: {}", args.data_file.display());

    let store = RepertoireStore::load(&args.data_file).context("Failed to load repertoire")?;

    let state = AppState::new(store);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("repertorio listening on http://localhost:{}", args.port);
    info!("Health check: http://localhost:{}/health", args.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves when the process is asked to stop (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("Terminate signal received, shutting down"),
    }
}
