use std::sync::Arc;

use anyhow::{Context, Result};
use todo_file_api::{build_router, config::AppConfig, state::AppState, store::JsonFileStore};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let store = JsonFileStore::new(config.todos_file.clone());
    info!(path = %store.path().display(), "todo file store");

    let app = build_router(AppState::new(Arc::new(store)));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "todo api started");

    let todos_file = config.todos_file.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let signal = stop_signal().await;
            info!(
                signal,
                path = %todos_file.display(),
                "todo api draining in-flight requests before exit"
            );
        })
        .await
        .context("server error")?;

    info!("todo api stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_file_api=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves with the name of the first stop signal received.
async fn stop_signal() -> &'static str {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(err) => {
                error!(error = %err, "cannot listen for Ctrl+C, todo api runs until SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(err) => {
                error!(error = %err, "cannot listen for SIGTERM, todo api runs until Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}
