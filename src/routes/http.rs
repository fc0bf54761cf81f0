//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::draft::{ManualQuestion, QuizDraft};
use crate::error::{ApiError, ApiResult};
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_get_options() -> impl IntoResponse { Json(menu_options()) }

#[instrument(level = "info", skip(state, body), fields(system = %body.system, range = %body.range, count = body.count))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> ApiResult<Json<GenerateOut>> {
  let questions = generate_numbers(&state, &body.system, &body.range, body.count)?;
  Ok(Json(GenerateOut { questions }))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_draft(
  State(state): State<Arc<AppState>>,
  Json(body): Json<DraftIn>,
) -> impl IntoResponse {
  let draft = create_draft(&state, body).await;
  info!(target: "suja_backend", id = %draft.id, "HTTP draft created");
  Json(draft)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_draft(
  State(state): State<Arc<AppState>>,
  Path(draft_id): Path<String>,
) -> ApiResult<Json<QuizDraft>> {
  Ok(Json(draft_or_404(&state, &draft_id).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_draft_question(
  State(state): State<Arc<AppState>>,
  Path(draft_id): Path<String>,
  Json(body): Json<ManualQuestion>,
) -> ApiResult<Json<QuizDraft>> {
  Ok(Json(add_manual_question(&state, &draft_id, body).await?))
}

#[instrument(level = "info", skip(state, body), fields(system = %body.system, range = %body.range, count = body.count))]
pub async fn http_post_draft_generate(
  State(state): State<Arc<AppState>>,
  Path(draft_id): Path<String>,
  Json(body): Json<GenerateIn>,
) -> ApiResult<Json<QuizDraft>> {
  let draft = generate_into_draft(&state, &draft_id, &body.system, &body.range, body.count).await?;
  info!(target: "generator", %draft_id, questions = draft.questions.len(), "HTTP batch appended to draft");
  Ok(Json(draft))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_draft_start(
  State(state): State<Arc<AppState>>,
  Path(draft_id): Path<String>,
) -> ApiResult<Json<SessionView>> {
  Ok(Json(start_draft(&state, &draft_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> ApiResult<Json<SessionView>> {
  Ok(Json(get_session_view(&state, &session_id).await?))
}

#[instrument(level = "info", skip(state, body), fields(question_index = body.question_index))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(body): Json<AnswerIn>,
) -> ApiResult<Json<AnswerOut>> {
  let out = submit_answer(&state, &session_id, body.question_index, body.answer.as_deref()).await?;
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body), fields(question_index = body.question_index))]
pub async fn http_post_timeout(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(body): Json<TimeoutIn>,
) -> ApiResult<Json<AnswerOut>> {
  Ok(Json(time_out(&state, &session_id, body.question_index).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HistoryOut { results: state.history.list().await.into_iter().map(HistoryEntryOut::from).collect() })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_history_item(
  State(state): State<Arc<AppState>>,
  Path(result_id): Path<String>,
) -> ApiResult<Json<HistoryEntryOut>> {
  let result = state
    .history
    .get(&result_id)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("quiz {}", result_id)))?;
  Ok(Json(HistoryEntryOut::from(result)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_history_item(
  State(state): State<Arc<AppState>>,
  Path(result_id): Path<String>,
) -> ApiResult<Json<DeletedOut>> {
  let deleted = state.history.delete(&result_id).await?;
  if !deleted {
    return Err(ApiError::NotFound(format!("quiz {}", result_id)));
  }
  info!(target: "history", %result_id, "HTTP history entry deleted");
  Ok(Json(DeletedOut { deleted }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_history(State(state): State<Arc<AppState>>) -> ApiResult<Json<DeletedOut>> {
  state.history.clear().await?;
  info!(target: "history", "HTTP history cleared");
  Ok(Json(DeletedOut { deleted: true }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_retake(
  State(state): State<Arc<AppState>>,
  Path(result_id): Path<String>,
) -> ApiResult<Json<SessionView>> {
  Ok(Json(retake(&state, &result_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(stats_out(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsOut>> {
  state.history.reset_stats().await?;
  info!(target: "history", "HTTP profile stats reset");
  Ok(Json(stats_out(&state).await))
}
