//! Shutdown signal handling for the server

use colored::Colorize;

/// Resolve when the process receives SIGINT or SIGTERM.
///
/// Used with `axum::serve(..).with_graceful_shutdown` so in-flight
/// transcriptions finish before exit.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => eprintln!("{} Received SIGINT (shutdown)", "↓".cyan()),
        _ = terminate => eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan()),
    }
}
