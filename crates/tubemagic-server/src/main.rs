//! TubeMagic Hub server entry point.
//!
//! Loads configuration, opens the secret store, then serves the hosting
//! page with graceful shutdown.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use tubemagic_server::config::ServerConfig;
use tubemagic_server::routes;
use tubemagic_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        mode = config.launch.mode.as_str(),
        encoding = ?config.launch.encoding,
        content_root = %config.content_root.display(),
        "TubeMagic Hub starting"
    );

    let state = AppState::from_config(&config)
        .await
        .context("failed to open secret store")?;

    let app = routes::build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "TubeMagic Hub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("TubeMagic Hub stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
