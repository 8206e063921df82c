use std::net::SocketAddr;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tracing::Dispatch;

use crate::error::ServerError;
use crate::handlers::{divide_by_zero, health_check, hello, respond_with};
use crate::middleware::{Filter, middleware};
use crate::settings::Settings;

/// Creates the demo router wrapped in the request logging middleware.
pub fn create_router(logger: Dispatch, filter: Option<Filter>) -> Router {
    let middleware_stack = ServiceBuilder::new().layer(middleware(logger, filter));

    Router::new()
        .route("/", get(hello))
        .route("/error", get(divide_by_zero))
        .route("/health", get(health_check))
        .route("/status/{code}", get(respond_with))
        .layer(middleware_stack)
}

/// Binds the configured address and serves until a shutdown signal.
pub async fn run_server(settings: &Settings, logger: Dispatch) -> Result<(), ServerError> {
    let addr = settings.address()?;
    let filter = filter_from(settings);
    let app = create_router(logger, filter);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(tag = "server", "Server listening on {}", addr);

    serve(listener, app).await
}

/// Serves `app` on an already bound listener, exposing peer addresses.
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> Result<(), ServerError> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Builds the bypass filter from `skip_paths`, if any are configured.
pub fn filter_from(settings: &Settings) -> Option<Filter> {
    if settings.skip_paths.is_empty() {
        None
    } else {
        Some(crate::middleware::skip_paths(settings.skip_paths.clone()))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

    tracing::info!(tag = "server", "Shutdown signal received");
}
