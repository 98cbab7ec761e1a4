//! HTTP server setup and routing.

pub mod handlers;
pub mod response;
pub mod state;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use self::state::AppState;
use crate::config::{create_cors_layer, ServerConfig};

/// Path of the product search endpoint.
pub const SEARCH_PATH: &str = "/api/v1/products/search";

/// Create the Axum application router with all routes and middleware.
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route(SEARCH_PATH, get(handlers::search_products))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .with_state(state)
}

/// Run the server on the specified address until Ctrl-C.
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(app, listener).await
}

/// Serve `app` on an already bound listener until Ctrl-C.
pub async fn serve(app: Router, listener: TcpListener) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("Server listening on {}", addr);
    info!("- Search endpoint: http://{}{}", addr, SEARCH_PATH);
    info!("- Health endpoint: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
