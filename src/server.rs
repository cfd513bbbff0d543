//! HTTP server initialization and runtime setup.
//!
//! Handles the initial links load, listener selection, and Axum server lifecycle.

use crate::config::{Config, Listen};
use crate::infrastructure::links::ReloadingLinks;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Live-reloading links cache (initial load is mandatory)
/// - Listener (TCP, Unix socket, or inherited on stdin)
/// - Axum HTTP server with graceful shutdown on Ctrl-C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The links file cannot be loaded
/// - Listener bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let links = ReloadingLinks::new(&config.links_path, config.check_interval())
        .with_context(|| format!("Failed to load links from {}", config.links_path.display()))?;
    tracing::info!(
        "Watching {} for changes every {}s",
        links.path().display(),
        links.check_interval().as_secs()
    );

    let state = AppState::new(Arc::new(links), config.base_url()?);
    let app = app_router(state, &config.static_dir);

    match config.listen()? {
        Listen::Tcp(addr) => {
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("Listening on http://{}", listener.local_addr()?);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        #[cfg(unix)]
        Listen::Unix(path) => {
            let listener = tokio::net::UnixListener::bind(&path)
                .with_context(|| format!("Failed to bind unix socket {}", path.display()))?;
            tracing::info!("Listening on unix:{}", path.display());

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        #[cfg(unix)]
        Listen::Stdin => {
            let listener = inherited_listener()?;
            tracing::info!("Listening on http://{} (inherited)", listener.local_addr()?);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        #[cfg(not(unix))]
        Listen::Unix(_) | Listen::Stdin => {
            anyhow::bail!("Unix sockets and inherited listeners are only supported on Unix");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Takes over a listening TCP socket passed as file descriptor 0.
#[cfg(unix)]
fn inherited_listener() -> Result<TcpListener> {
    use std::os::fd::FromRawFd;

    // SAFETY: fd 0 is handed over by the parent process as a listening socket
    // and nothing else in this process reads stdin.
    let listener = unsafe { std::net::TcpListener::from_raw_fd(0) };
    listener
        .set_nonblocking(true)
        .context("stdin is not a listening socket")?;

    TcpListener::from_std(listener).context("stdin is not a listening socket")
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
