//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Generating numeral batches (stateless, or appended to a draft)
//!   - Draft authoring and starting sessions
//!   - Answering / timing out questions, saving finished sessions to history
//!   - History, retake and stats operations

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, instrument, warn};

use crate::domain::{DigitRange, NumberSystem, QuizQuestion};
use crate::draft::{ManualQuestion, QuizDraft};
use crate::error::{ApiError, ApiResult};
use crate::generator::synthesize_with;
use crate::presets::{range_options, system_options, COUNT_OPTIONS};
use crate::protocol::{AnswerOut, DraftIn, OptionsOut, QuestionView, SessionView, StatsOut};
use crate::session::{QuizSession, SubmitOutcome};
use crate::state::AppState;
use crate::util::{format_total, trunc_for_log};

pub fn menu_options() -> OptionsOut {
  OptionsOut {
    systems: system_options(),
    ranges: range_options(),
    counts: COUNT_OPTIONS.to_vec(),
  }
}

/// Parse the wire inputs and synthesize a fresh batch.
#[instrument(level = "info", skip(state))]
pub fn generate_numbers(state: &AppState, system: &str, range: &str, count: usize) -> ApiResult<Vec<QuizQuestion>> {
  let system: NumberSystem = system.parse()?;
  let range: DigitRange = range.parse()?;
  let mut rng = rand::thread_rng();
  let batch = synthesize_with(&mut rng, system, range, count, Utc::now(), &state.settings).map_err(|e| {
    warn!(target: "generator", %system, %range, count, error = %e, "Numeral generation failed");
    e
  })?;
  info!(target: "generator", %system, %range, count = batch.len(), "Numeral batch generated");
  Ok(batch)
}

#[instrument(level = "info", skip(state, input), fields(title = %trunc_for_log(&input.title, 40)))]
pub async fn create_draft(state: &AppState, input: DraftIn) -> QuizDraft {
  let seconds = input.timer_duration.unwrap_or(state.config.quiz.default_timer_seconds);
  let draft = QuizDraft::new(input.title, input.quiz_type).with_timer(input.timer_enabled, seconds);
  state.insert_draft(draft.clone()).await;
  draft
}

pub async fn draft_or_404(state: &AppState, draft_id: &str) -> ApiResult<QuizDraft> {
  state
    .get_draft(draft_id)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("draft {}", draft_id)))
}

#[instrument(level = "info", skip(state, question), fields(%draft_id))]
pub async fn add_manual_question(state: &AppState, draft_id: &str, question: ManualQuestion) -> ApiResult<QuizDraft> {
  state
    .update_draft(draft_id, |d| {
      d.add_question(question);
      d.clone()
    })
    .await
    .ok_or_else(|| ApiError::NotFound(format!("draft {}", draft_id)))
}

/// Generate outside the lock, then merge the batch into the draft's question list.
#[instrument(level = "info", skip(state), fields(%draft_id))]
pub async fn generate_into_draft(
  state: &AppState,
  draft_id: &str,
  system: &str,
  range: &str,
  count: usize,
) -> ApiResult<QuizDraft> {
  draft_or_404(state, draft_id).await?;
  let batch = generate_numbers(state, system, range, count)?;
  state
    .update_draft(draft_id, |d| {
      d.append_batch(batch);
      d.clone()
    })
    .await
    .ok_or_else(|| ApiError::NotFound(format!("draft {}", draft_id)))
}

#[instrument(level = "info", skip(state), fields(%draft_id))]
pub async fn start_draft(state: &AppState, draft_id: &str) -> ApiResult<SessionView> {
  let draft = draft_or_404(state, draft_id).await?;
  let session = draft.start(Utc::now())?;
  info!(target: "session", %draft_id, session_id = %session.id, questions = session.questions.len(), "Quiz started");
  let view = session_view(&session);
  state.insert_session(session).await;
  // Authoring ends here; a later run of the same questions goes through retake.
  state.remove_draft(draft_id).await;
  Ok(view)
}

pub async fn get_session_view(state: &AppState, session_id: &str) -> ApiResult<SessionView> {
  state
    .get_session(session_id)
    .await
    .map(|s| session_view(&s))
    .ok_or_else(|| ApiError::NotFound(format!("session {}", session_id)))
}

/// Record an answer (`None` = no answer given). Finishing the last question saves the result to history.
#[instrument(level = "info", skip(state, answer), fields(%session_id, question_index))]
pub async fn submit_answer(
  state: &AppState,
  session_id: &str,
  question_index: usize,
  answer: Option<&str>,
) -> ApiResult<AnswerOut> {
  record(state, session_id, question_index, answer.is_none(), |s, now| s.submit_answer(question_index, answer, now)).await
}

/// The question's timer ran out.
#[instrument(level = "info", skip(state), fields(%session_id, question_index))]
pub async fn time_out(state: &AppState, session_id: &str, question_index: usize) -> ApiResult<AnswerOut> {
  record(state, session_id, question_index, true, |s, now| s.timeout(question_index, now)).await
}

async fn record(
  state: &AppState,
  session_id: &str,
  question_index: usize,
  timed_out: bool,
  apply: impl FnOnce(&mut QuizSession, DateTime<Utc>) -> SubmitOutcome,
) -> ApiResult<AnswerOut> {
  let (outcome, session) = state
    .update_session(session_id, |s| (apply(s, Utc::now()), s.clone()))
    .await
    .ok_or_else(|| ApiError::NotFound(format!("session {}", session_id)))?;

  let out = match outcome {
    SubmitOutcome::Ignored => {
      warn!(target: "session", %session_id, question_index, "Submission ignored (repeat or stale)");
      AnswerOut { accepted: false, is_correct: false, correct_answer: None, completed: false, session: session_view(&session) }
    }
    SubmitOutcome::Recorded { is_correct, correct_answer, completed } => {
      info!(target: "session", %session_id, question_index, is_correct, timed_out, "Answer recorded");
      if completed {
        save_finished(state, &session).await?;
        // The result now lives in history; the session is not addressable any more.
        state.remove_session(session_id).await;
      }
      AnswerOut { accepted: true, is_correct, correct_answer: Some(correct_answer), completed, session: session_view(&session) }
    }
  };
  Ok(out)
}

async fn save_finished(state: &AppState, session: &QuizSession) -> ApiResult<()> {
  let result = session.result()?;
  let (id, score, percentage) = (result.id.clone(), result.score, result.percentage);
  match state.history.save(result).await {
    Ok(stats) => {
      info!(target: "history", %id, score, percentage, total_quizzes = stats.total_quizzes, "Quiz result saved");
      Ok(())
    }
    Err(e) => {
      error!(target: "history", %id, error = %e, "Saving quiz result failed");
      Err(e.into())
    }
  }
}

/// Open a new session over the questions of a saved result.
#[instrument(level = "info", skip(state), fields(%result_id))]
pub async fn retake(state: &AppState, result_id: &str) -> ApiResult<SessionView> {
  let saved = state
    .history
    .get(result_id)
    .await
    .ok_or_else(|| ApiError::NotFound(format!("quiz {}", result_id)))?;
  let timer = saved.timer_enabled.then_some(state.config.quiz.default_timer_seconds);
  let session = QuizSession::start(saved.title, saved.quiz_type, saved.questions, timer, Utc::now())?;
  let view = session_view(&session);
  state.insert_session(session).await;
  Ok(view)
}

pub async fn stats_out(state: &AppState) -> StatsOut {
  let stats = state.history.stats().await;
  let total_time_label = format_total(stats.total_time_spent);
  StatsOut { stats, total_time_label }
}

pub fn session_view(s: &QuizSession) -> SessionView {
  let question = s.current_index().and_then(|index| {
    let q = s.questions.get(index)?;
    let mut rng = StdRng::seed_from_u64(option_seed(&s.id, index));
    Some(QuestionView {
      id: q.id.clone(),
      question: q.question.clone(),
      media: q.media.clone(),
      options: s.options(index, &mut rng),
    })
  });
  SessionView {
    id: s.id.clone(),
    title: s.title.clone(),
    quiz_type: s.quiz_type,
    status: s.status(),
    question_index: s.current_index(),
    total_questions: s.questions.len(),
    score: s.score(),
    timer_seconds: s.timer_seconds,
    question,
    result: s.result().ok(),
  }
}

// Same session + question → same option order, however often the view is fetched.
fn option_seed(session_id: &str, index: usize) -> u64 {
  let mut h = DefaultHasher::new();
  session_id.hash(&mut h);
  index.hash(&mut h);
  h.finish()
}
