//! Krimson Project Tracker - HTTP API server entry point

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;

use krimson_tracker::{Config, create_app, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // Only warn if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = Config::load()
        .context("Failed to load configuration. Check config/*.toml and KRIMSON__* env vars")?;

    init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    tracing::info!("Starting Krimson Project Tracker...");
    tracing::info!(
        "Configuration loaded: server={}:{}",
        config.server.host,
        config.server.port
    );

    let router = create_app(&config).context("Failed to create application")?;

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid server host '{}'", config.server.host))?,
        config.server.port,
    );

    tracing::info!("Server listening on {}", addr);
    if config.server.enable_docs {
        tracing::info!("API documentation available at http://{}/docs", addr);
    } else {
        tracing::info!("API documentation disabled");
    }

    let shutdown_token = CancellationToken::new();
    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown_token.clone()));

    tokio::select! {
        result = server.into_future() => result.context("Server error")?,
        _ = drain_deadline(shutdown_token, drain_timeout) => {
            tracing::warn!("Shutdown timeout reached, dropping in-flight requests");
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM, then signal shutdown
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }

    shutdown_token.cancel();
}

/// Resolves `timeout` after shutdown was requested
async fn drain_deadline(shutdown_token: CancellationToken, timeout: Duration) {
    shutdown_token.cancelled().await;
    tokio::time::sleep(timeout).await;
}
