//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "suja_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "suja_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = reply_to_text(&txt, &state).await;

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "suja_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "suja_backend", "WebSocket disconnected");
}

/// Parse one text frame and produce the reply for it.
pub async fn reply_to_text(txt: &str, state: &AppState) -> ServerWsMessage {
  match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "suja_backend", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  }
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let reply = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),

    ClientWsMessage::Generate { system, range, count } => {
      generate_numbers(state, &system, &range, count).map(|questions| {
        info!(target: "generator", %system, %range, count, "WS batch served");
        ServerWsMessage::Batch { questions }
      })
    }

    ClientWsMessage::GetSession { session_id } => {
      get_session_view(state, &session_id).await.map(|session| ServerWsMessage::Session { session })
    }

    ClientWsMessage::SubmitAnswer { session_id, question_index, answer } => {
      submit_answer(state, &session_id, question_index, answer.as_deref())
        .await
        .map(|result| ServerWsMessage::AnswerResult { result })
    }

    ClientWsMessage::Timeout { session_id, question_index } => {
      time_out(state, &session_id, question_index)
        .await
        .map(|result| ServerWsMessage::AnswerResult { result })
    }
  };

  reply.unwrap_or_else(|e| ServerWsMessage::Error { message: e.to_string() })
}
