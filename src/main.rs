//! Suja · Korean Numeral Quiz Backend
//!
//! - Axum HTTP + WebSocket API
//! - Numeral quiz generation (Sino-Korean / native Korean)
//! - Quiz history persisted to a JSON file when configured
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   QUIZ_CONFIG_PATH  : path to TOML config (generation limits, timer, storage)
//!   HISTORY_PATH      : JSON history file (overrides storage.history_path)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use suja::routes::build_router;
use suja::state::AppState;
use suja::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared application state (draft/session stores, history, generation settings).
  let state = Arc::new(AppState::from_env().await);

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "suja_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "suja_backend", error = %e, "Failed to listen for ctrl-c");
  }
  info!(target: "suja_backend", "Shutdown signal received");
}
