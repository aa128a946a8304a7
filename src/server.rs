//! HTTP server initialization and runtime setup.
//!
//! Wires the HTTP client, credential provider, Sheets repository, observer and
//! resolver together, then runs the Axum server until a shutdown signal.

use crate::application::services::RedirectService;
use crate::config::Config;
use crate::infrastructure::auth;
use crate::infrastructure::observability::TracingObserver;
use crate::infrastructure::sheets::SheetsEntryRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Builds the redirect service described by `config`.
///
/// Shared by the server and the admin CLI.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the credentials
/// cannot be loaded (e.g. an unreadable service account key file).
pub fn build_redirect_service(config: &Config) -> Result<RedirectService> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .build()
        .context("Failed to build HTTP client")?;

    let tokens = auth::from_source(&config.credentials, client.clone())
        .context("Failed to load credentials")?;

    let repository = Arc::new(SheetsEntryRepository::new(
        client,
        tokens,
        config.sheets_api_base.clone(),
        config.doc_id.clone(),
    ));

    Ok(RedirectService::new(
        repository,
        Arc::new(TracingObserver::new()),
        config.sheet_name.clone(),
        config.default_url.clone(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Service construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let service = build_redirect_service(&config)?;
    tracing::info!("Working with document {}", config.doc_id);

    let state = AppState::new(Arc::new(service));
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Completes on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
