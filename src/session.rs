//! Quiz-taking session: one question at a time, one answer per question.
//!
//! States: `InProgress` → `Completed`. A submission only counts for the
//! question currently being asked; repeats and stale submissions are ignored.
//! A timeout is a submission with no answer.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{AnswerRecord, QuizQuestion, QuizResult, QuizType};
use crate::error::SessionError;

/// Recorded as the selected answer when the timer runs out.
pub const NO_ANSWER: &str = "No answer (Time out)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
  InProgress,
  Completed,
}

/// What happened to a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
  Recorded { is_correct: bool, correct_answer: String, completed: bool },
  Ignored,
}

#[derive(Clone, Debug)]
pub struct QuizSession {
  pub id: String,
  pub title: String,
  pub quiz_type: QuizType,
  pub questions: Vec<QuizQuestion>,
  /// Seconds per question when the timer is on.
  pub timer_seconds: Option<u32>,
  current: usize,
  score: u32,
  answers: Vec<AnswerRecord>,
  started_at: DateTime<Utc>,
  completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
  pub fn start(
    title: impl Into<String>,
    quiz_type: QuizType,
    questions: Vec<QuizQuestion>,
    timer_seconds: Option<u32>,
    now: DateTime<Utc>,
  ) -> Result<Self, SessionError> {
    if questions.is_empty() {
      return Err(SessionError::NoQuestions);
    }
    Ok(Self {
      id: Uuid::new_v4().to_string(),
      title: title.into(),
      quiz_type,
      questions,
      timer_seconds,
      current: 0,
      score: 0,
      answers: Vec::new(),
      started_at: now,
      completed_at: None,
    })
  }

  pub fn status(&self) -> SessionStatus {
    if self.completed_at.is_some() { SessionStatus::Completed } else { SessionStatus::InProgress }
  }

  pub fn score(&self) -> u32 { self.score }

  pub fn answers(&self) -> &[AnswerRecord] { &self.answers }

  /// Index of the question being asked; `None` once completed.
  pub fn current_index(&self) -> Option<usize> {
    match self.status() {
      SessionStatus::InProgress => Some(self.current),
      SessionStatus::Completed => None,
    }
  }

  pub fn current(&self) -> Option<&QuizQuestion> {
    self.current_index().and_then(|i| self.questions.get(i))
  }

  /// The correct answer and the three wrong ones for question `index`, shuffled.
  pub fn options<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Vec<String> {
    let Some(q) = self.questions.get(index) else { return Vec::new() };
    let mut options: Vec<String> = std::iter::once(q.correct_answer.clone())
      .chain(q.wrong_answers.iter().cloned())
      .collect();
    options.shuffle(rng);
    options
  }

  /// Answer question `index`. `None` means the timer ran out.
  pub fn submit_answer(&mut self, index: usize, selected: Option<&str>, now: DateTime<Utc>) -> SubmitOutcome {
    if self.current_index() != Some(index) {
      return SubmitOutcome::Ignored;
    }
    let q = &self.questions[index];
    let is_correct = selected.is_some_and(|s| s == q.correct_answer);
    if is_correct {
      self.score += 1;
    }
    self.answers.push(AnswerRecord {
      question: q.question.clone(),
      selected_answer: selected.unwrap_or(NO_ANSWER).to_string(),
      correct_answer: q.correct_answer.clone(),
      is_correct,
    });
    let correct_answer = q.correct_answer.clone();

    self.current += 1;
    let completed = self.current >= self.questions.len();
    if completed {
      self.completed_at = Some(now);
    }
    SubmitOutcome::Recorded { is_correct, correct_answer, completed }
  }

  pub fn timeout(&mut self, index: usize, now: DateTime<Utc>) -> SubmitOutcome {
    self.submit_answer(index, None, now)
  }

  /// `round(score / total * 100)`.
  pub fn percentage(&self) -> u32 {
    let total = self.questions.len() as f64;
    (f64::from(self.score) / total * 100.0).round() as u32
  }

  /// Milliseconds from start to completion (or to `now` while running).
  pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
    let end = self.completed_at.unwrap_or(now);
    (end - self.started_at).num_milliseconds().max(0) as u64
  }

  /// Immutable record of a finished session, ready for the history store.
  pub fn result(&self) -> Result<QuizResult, SessionError> {
    let completed_at = self.completed_at.ok_or(SessionError::NotCompleted)?;
    Ok(QuizResult {
      id: self.id.clone(),
      date: completed_at.to_rfc3339(),
      title: self.title.clone(),
      quiz_type: self.quiz_type,
      score: self.score,
      total_questions: self.questions.len() as u32,
      percentage: self.percentage(),
      time_taken: self.elapsed_ms(completed_at),
      timer_enabled: self.timer_seconds.is_some(),
      answers: self.answers.clone(),
      questions: self.questions.clone(),
    })
  }
}
