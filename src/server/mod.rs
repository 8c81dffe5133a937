pub mod handlers;
mod types;

pub use handlers::AppState;

use crate::{Result, config::ServerConfig, model::ModelHandle};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Builds the application router around an already-loaded model.
pub fn router(model: ModelHandle) -> Router {
    let app_state = AppState::new(model);

    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: ServerConfig, model: ModelHandle) -> Result<()> {
    let app = router(model);

    let addr = SocketAddr::new(config.host.parse()?, config.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
