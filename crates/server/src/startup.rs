use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use service::messages::{InMemoryMessageStore, LenObserver};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::metrics;
use crate::routes::{self, AppState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router wired to a fresh in-memory store that feeds the stored-messages gauge.
pub fn build_app() -> Router {
    let observer: LenObserver = Arc::new(metrics::set_stored);
    let store = InMemoryMessageStore::with_len_observer(observer);
    routes::build_router(AppState::new(store), build_cors())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

/// Public entry: build the app and serve until `shutdown` resolves.
/// `config` is expected to have passed `AppConfig::normalize_and_validate`.
pub async fn run<F>(config: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.server.bind_addr();
    let app = build_app();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    let local = listener.local_addr()?;
    info!(addr = %local, "message api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("message api stopped");
    Ok(())
}
