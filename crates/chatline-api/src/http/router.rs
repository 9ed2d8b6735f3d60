//! Axum router configuration with middleware.
//!
//! API routes live under `/api/`; `/` is a plaintext liveness probe and
//! `/health` a JSON one. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Body of `GET /`.
pub const LIVENESS_TEXT: &str = "Chatline backend running (LLM replies with fallback)";

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route(
        "/messages",
        get(handlers::message::list_messages).post(handlers::message::submit_message),
    );

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Plaintext liveness string.
async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
