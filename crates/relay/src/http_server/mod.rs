use axum::extract::DefaultBodyLimit;
use axum::{Extension, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tokio::sync::watch;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse};
use tower_http::LatencyUnit;

pub mod client;
mod config;
mod handlers;
pub mod upload;

pub use config::{Config, ConfigError};

use crate::ServiceState;

const STATUS_PREFIX: &str = "/_status";

/// Build the relay router: the two upload routes, the status nest, and
/// the shared front door (CORS, trace, fallback).
pub fn router(config: &Config, state: ServiceState) -> Router {
    // One pre-approved origin, exact match. Disallowed origins are
    // rejected by the cross-origin contract, never by handler logic.
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST])
        .allow_headers(vec![CONTENT_TYPE])
        .allow_origin(AllowOrigin::list([config.frontend_origin.clone()]))
        .allow_credentials(false);

    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(config.log_level)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    Router::new()
        .nest(STATUS_PREFIX, health::router(state.clone()))
        .merge(upload::router(state.clone()))
        .fallback(handlers::not_found_handler)
        // upload size limits belong to a fronting proxy, not the relay
        .layer(DefaultBodyLimit::disable())
        .layer(cors_layer)
        .layer(Extension(config.clone()))
        .with_state(state)
        .layer(trace_layer)
}

/// Run the relay HTTP server until the shutdown signal fires.
pub async fn run(
    config: Config,
    state: ServiceState,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    let listen_addr = config.listen_addr;
    let router = router(&config, state);

    tracing::info!(addr = ?listen_addr, "relay server listening");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    Ok(())
}

mod health;

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}
