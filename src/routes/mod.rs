//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers), adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
  Router::new()
    // WebSocket
    .route("/ws", get(ws::ws_upgrade))
    // Numeral generation
    .route("/api/v1/health", get(http::http_health))
    .route("/api/v1/numbers/options", get(http::http_get_options))
    .route("/api/v1/numbers/generate", post(http::http_post_generate))
    // Authoring
    .route("/api/v1/drafts", post(http::http_post_draft))
    .route("/api/v1/drafts/:id", get(http::http_get_draft))
    .route("/api/v1/drafts/:id/questions", post(http::http_post_draft_question))
    .route("/api/v1/drafts/:id/generate", post(http::http_post_draft_generate))
    .route("/api/v1/drafts/:id/start", post(http::http_post_draft_start))
    // Quiz taking
    .route("/api/v1/sessions/:id", get(http::http_get_session))
    .route("/api/v1/sessions/:id/answer", post(http::http_post_answer))
    .route("/api/v1/sessions/:id/timeout", post(http::http_post_timeout))
    // History + stats
    .route("/api/v1/history", get(http::http_get_history).delete(http::http_delete_history))
    .route(
      "/api/v1/history/:id",
      get(http::http_get_history_item).delete(http::http_delete_history_item),
    )
    .route("/api/v1/history/:id/retake", post(http::http_post_retake))
    .route("/api/v1/stats", get(http::http_get_stats).delete(http::http_delete_stats))
    // State + CORS + HTTP tracing
    .with_state(state)
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
