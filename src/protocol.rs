//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{ProfileStats, QuizQuestion, QuizResult, QuizType};
use crate::presets::{RangeOption, SystemOption};
use crate::session::SessionStatus;
use crate::util::format_clock;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  Generate {
    system: String,
    range: String,
    count: usize,
  },
  GetSession {
    #[serde(rename = "sessionId")]
    session_id: String,
  },
  SubmitAnswer {
    #[serde(rename = "sessionId")]
    session_id: String,
    #[serde(rename = "questionIndex")]
    question_index: usize,
    #[serde(default)]
    answer: Option<String>,
  },
  Timeout {
    #[serde(rename = "sessionId")]
    session_id: String,
    #[serde(rename = "questionIndex")]
    question_index: usize,
  },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  Batch {
    questions: Vec<QuizQuestion>,
  },
  Session {
    session: SessionView,
  },
  AnswerResult {
    result: AnswerOut,
  },
  Error {
    message: String,
  },
}

/// The question being asked, without revealing which option is correct.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
  pub id: String,
  pub question: String,
  pub media: Option<String>,
  pub options: Vec<String>,
}

/// Snapshot of a session as shown to the quiz taker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
  pub id: String,
  pub title: String,
  #[serde(rename = "type")]
  pub quiz_type: QuizType,
  pub status: SessionStatus,
  pub question_index: Option<usize>,
  pub total_questions: usize,
  pub score: u32,
  pub timer_seconds: Option<u32>,
  pub question: Option<QuestionView>,
  /// Present once the session is completed.
  pub result: Option<QuizResult>,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct OptionsOut {
  pub systems: Vec<SystemOption>,
  pub ranges: Vec<RangeOption>,
  pub counts: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateIn {
  pub system: String,
  pub range: String,
  pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateOut {
  pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftIn {
  pub title: String,
  #[serde(rename = "type", default)]
  pub quiz_type: QuizType,
  #[serde(default)]
  pub timer_enabled: bool,
  #[serde(default)]
  pub timer_duration: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
  pub question_index: usize,
  #[serde(default)]
  pub answer: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeoutIn {
  pub question_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
  /// False when the submission was a repeat or for a question not being asked.
  pub accepted: bool,
  pub is_correct: bool,
  pub correct_answer: Option<String>,
  pub completed: bool,
  pub session: SessionView,
}

/// A saved result plus its `m:ss` duration for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryOut {
  #[serde(flatten)]
  pub result: QuizResult,
  pub time_taken_label: String,
}

impl From<QuizResult> for HistoryEntryOut {
  fn from(result: QuizResult) -> Self {
    let time_taken_label = format_clock(result.time_taken);
    Self { result, time_taken_label }
  }
}

#[derive(Debug, Serialize)]
pub struct HistoryOut {
  pub results: Vec<HistoryEntryOut>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOut {
  #[serde(flatten)]
  pub stats: ProfileStats,
  /// `totalTimeSpent` formatted as `Xh Ym`.
  pub total_time_label: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedOut {
  pub deleted: bool,
}
