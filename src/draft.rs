//! Quiz authoring: a draft owns its question list and merges generated batches into it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ContentType, QuizQuestion, QuizType};
use crate::error::{DraftError, SessionError};
use crate::session::QuizSession;

pub const DEFAULT_TIMER_SECONDS: u32 = 30;

/// A hand-written question as submitted by the author.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualQuestion {
  pub question: String,
  pub correct_answer: String,
  pub wrong_answers: [String; 3],
  #[serde(default)]
  pub media: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraft {
  pub id: String,
  pub title: String,
  #[serde(rename = "type")]
  pub quiz_type: QuizType,
  pub questions: Vec<QuizQuestion>,
  pub timer_enabled: bool,
  pub timer_duration: u32,
}

impl QuizDraft {
  pub fn new(title: impl Into<String>, quiz_type: QuizType) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      title: title.into(),
      quiz_type,
      questions: Vec::new(),
      timer_enabled: false,
      timer_duration: DEFAULT_TIMER_SECONDS,
    }
  }

  pub fn with_timer(mut self, enabled: bool, seconds: u32) -> Self {
    self.timer_enabled = enabled;
    self.timer_duration = seconds;
    self
  }

  pub fn add_question(&mut self, q: ManualQuestion) -> &QuizQuestion {
    self.questions.push(QuizQuestion {
      id: Uuid::new_v4().to_string(),
      question: q.question,
      correct_answer: q.correct_answer,
      wrong_answers: q.wrong_answers,
      media: q.media,
      content_type: Some(ContentType::Manual),
    });
    &self.questions[self.questions.len() - 1]
  }

  /// Append a generated batch, keeping generation order.
  pub fn append_batch(&mut self, batch: Vec<QuizQuestion>) {
    self.questions.extend(batch);
  }

  /// Title present and every question fully filled in.
  pub fn validate(&self) -> Result<(), DraftError> {
    if self.title.trim().is_empty() {
      return Err(DraftError::MissingTitle);
    }
    if self.questions.is_empty() {
      return Err(DraftError::NoQuestions);
    }
    for (index, q) in self.questions.iter().enumerate() {
      let complete = !q.question.trim().is_empty()
        && !q.correct_answer.trim().is_empty()
        && q.wrong_answers.iter().all(|w| !w.trim().is_empty());
      if !complete {
        return Err(DraftError::IncompleteQuestion { index });
      }
    }
    Ok(())
  }

  pub fn timer_seconds(&self) -> Option<u32> {
    self.timer_enabled.then_some(self.timer_duration)
  }

  /// Validate, then open a session over a snapshot of the questions.
  pub fn start(&self, now: DateTime<Utc>) -> Result<QuizSession, DraftError> {
    self.validate()?;
    QuizSession::start(self.title.clone(), self.quiz_type, self.questions.clone(), self.timer_seconds(), now)
      .map_err(|e| match e {
        SessionError::NoQuestions | SessionError::NotCompleted => DraftError::NoQuestions,
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{DigitRange, NumberSystem};
  use crate::generator::synthesize;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn manual(q: &str) -> ManualQuestion {
    ManualQuestion {
      question: q.into(),
      correct_answer: "빨강".into(),
      wrong_answers: ["파랑".into(), "노랑".into(), "초록".into()],
      media: None,
    }
  }

  #[test]
  fn manual_and_generated_questions_merge_in_order() {
    let mut draft = QuizDraft::new("Mixed", QuizType::Numbers);
    draft.add_question(manual("Red?"));
    let batch = synthesize(&mut StdRng::seed_from_u64(1), NumberSystem::NativeKorean, DigitRange::new(1, 10), 5, Utc::now())
      .unwrap();
    draft.append_batch(batch);

    assert_eq!(draft.questions.len(), 6);
    assert_eq!(draft.questions[0].content_type, Some(ContentType::Manual));
    assert!(draft.questions[1..].iter().all(|q| q.content_type == Some(ContentType::Numbers)));
    assert!(draft.validate().is_ok());
  }

  #[test]
  fn validation_rejects_missing_title_and_blank_fields() {
    let mut draft = QuizDraft::new("  ", QuizType::Text);
    draft.add_question(manual("Red?"));
    assert_eq!(draft.validate(), Err(DraftError::MissingTitle));

    draft.title = "Colors".into();
    let mut blank = manual("Blue?");
    blank.wrong_answers[2] = " ".into();
    draft.add_question(blank);
    assert_eq!(draft.validate(), Err(DraftError::IncompleteQuestion { index: 1 }));

    let empty = QuizDraft::new("Nothing", QuizType::Text);
    assert_eq!(empty.validate(), Err(DraftError::NoQuestions));
  }

  #[test]
  fn start_carries_timer_setting() {
    let mut draft = QuizDraft::new("Timed", QuizType::Audio).with_timer(true, 15);
    draft.add_question(manual("Red?"));
    let session = draft.start(Utc::now()).unwrap();
    assert_eq!(session.timer_seconds, Some(15));
    assert_eq!(session.questions.len(), 1);

    let untimed = QuizDraft { timer_enabled: false, ..draft };
    assert_eq!(untimed.timer_seconds(), None);
  }
}
