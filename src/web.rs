//! Router assembly and server loop

use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::api;
use crate::state::AppState;

/// Build the application router with CORS and request tracing
pub fn app(state: AppState) -> Result<Router> {
    let origin: HeaderValue = state
        .config
        .server
        .cors_origin
        .parse()
        .map_err(|_| crate::PlannerError::validation("server.cors_origin is not a valid origin"))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Ok(api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Bind and serve until the process is stopped
pub async fn run(state: AppState, port: u16) -> Result<()> {
    let router = app(state)?;

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("The server is listening on port {port}");
    axum::serve(listener, router)
        .await
        .with_context(|| "Server terminated unexpectedly")?;
    Ok(())
}
