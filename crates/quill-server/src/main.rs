//! quill-server - REST API server binary.

use std::net::SocketAddr;

use anyhow::Context;
use quill_core::QuillConfig;
use quill_server::{create_server, AppState};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Configuration file from `QUILL_CONFIG`, otherwise the environment.
fn load_config() -> anyhow::Result<QuillConfig> {
    match std::env::var("QUILL_CONFIG") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            QuillConfig::from_file(&path).with_context(|| format!("failed to load {}", path))
        }
        Err(_) => Ok(QuillConfig::from_env()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("quill_server=debug".parse()?),
        )
        .init();

    // Get configuration from environment
    let host = std::env::var("QUILL_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("QUILL_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .context("QUILL_PORT must be a valid port number")?;

    let config = load_config()?;
    info!(
        max_upload_bytes = config.max_upload_bytes,
        max_topic_chars = config.synthesis.max_topic_chars,
        "Configuration loaded"
    );

    let state = AppState::in_memory(config)?;
    let app = create_server(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting quill-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
