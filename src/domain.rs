//! Domain models: numbering systems, digit ranges, quiz questions and quiz results.
//!
//! JSON field names follow the records the quiz client already stores
//! (camelCase: `correctAnswer`, `wrongAnswers`, `timeTaken`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Which Korean numbering system a numeral is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberSystem {
  /// Chinese-origin numerals (일, 이, 삼 ...), used for large numbers.
  #[serde(rename = "sino")]
  SinoKorean,
  /// Indigenous numerals (하나, 둘, 셋 ...), 1 through 99 only.
  #[serde(rename = "native")]
  NativeKorean,
}

impl NumberSystem {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::SinoKorean => "sino",
      Self::NativeKorean => "native",
    }
  }
}

impl fmt::Display for NumberSystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for NumberSystem {
  type Err = GenerationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "sino" => Ok(Self::SinoKorean),
      "native" => Ok(Self::NativeKorean),
      other => Err(GenerationError::UnknownSystem(other.to_string())),
    }
  }
}

/// Closed integer interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitRange {
  pub min: u64,
  pub max: u64,
}

impl DigitRange {
  pub fn new(min: u64, max: u64) -> Self {
    Self { min, max }
  }
}

impl fmt::Display for DigitRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.min, self.max)
  }
}

/// Parses the `"<min>-<max>"` form used by the range menu.
impl FromStr for DigitRange {
  type Err = GenerationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || GenerationError::InvalidRange(s.to_string());
    let (lo, hi) = s.trim().split_once('-').ok_or_else(invalid)?;
    let min = lo.trim().parse::<u64>().map_err(|_| invalid())?;
    let max = hi.trim().parse::<u64>().map_err(|_| invalid())?;
    if min > max {
      return Err(invalid());
    }
    Ok(Self { min, max })
  }
}

/// Kind of quiz being authored. Drives how the client presents media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizType {
  Images,
  Audio,
  Text,
  Numbers,
  Shuffle,
}

impl Default for QuizType {
  fn default() -> Self { QuizType::Text }
}

/// Where a question came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
  /// Produced by the numeral generator.
  Numbers,
  /// Typed in by the quiz author.
  Manual,
}

/// One multiple-choice question: a correct answer plus exactly three wrong ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub id: String,
  pub question: String,
  pub correct_answer: String,
  pub wrong_answers: [String; 3],
  #[serde(default)]
  pub media: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content_type: Option<ContentType>,
}

/// How the user answered one question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
  pub question: String,
  pub selected_answer: String,
  pub correct_answer: String,
  pub is_correct: bool,
}

/// Finished quiz, as stored in history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
  pub id: String,
  /// RFC 3339 completion timestamp.
  pub date: String,
  pub title: String,
  #[serde(rename = "type")]
  pub quiz_type: QuizType,
  pub score: u32,
  pub total_questions: u32,
  pub percentage: u32,
  /// Milliseconds from the first question to the last answer.
  pub time_taken: u64,
  pub timer_enabled: bool,
  pub answers: Vec<AnswerRecord>,
  pub questions: Vec<QuizQuestion>,
}

/// Cumulative totals over every saved quiz.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
  pub total_quizzes: u64,
  pub total_questions: u64,
  pub correct_answers: u64,
  pub wrong_answers: u64,
  /// Milliseconds.
  pub total_time_spent: u64,
  /// Percent of correct answers, rounded to one decimal.
  pub average_score: f64,
}

impl ProfileStats {
  /// Fold one finished quiz into the totals.
  pub fn record(&mut self, result: &QuizResult) {
    self.total_quizzes += 1;
    self.total_questions += u64::from(result.total_questions);
    self.correct_answers += u64::from(result.score);
    self.wrong_answers += u64::from(result.total_questions.saturating_sub(result.score));
    self.total_time_spent += result.time_taken;
    self.average_score = if self.total_questions == 0 {
      0.0
    } else {
      let pct = self.correct_answers as f64 / self.total_questions as f64 * 100.0;
      (pct * 10.0).round() / 10.0
    };
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn parses_menu_ranges() {
    assert_eq!("1-10".parse::<DigitRange>().unwrap(), DigitRange::new(1, 10));
    assert_eq!(" 1 - 100000000 ".parse::<DigitRange>().unwrap(), DigitRange::new(1, 100_000_000));
    assert!("10".parse::<DigitRange>().is_err());
    assert!("a-b".parse::<DigitRange>().is_err());
    assert!("10-1".parse::<DigitRange>().is_err());
    assert!("-5-10".parse::<DigitRange>().is_err());
  }

  #[test]
  fn number_system_wire_names() {
    assert_eq!("sino".parse::<NumberSystem>().unwrap(), NumberSystem::SinoKorean);
    assert_eq!("native".parse::<NumberSystem>().unwrap(), NumberSystem::NativeKorean);
    assert!("roman".parse::<NumberSystem>().is_err());
    assert_eq!(serde_json::to_string(&NumberSystem::NativeKorean).unwrap(), "\"native\"");
  }

  #[test]
  fn question_uses_camel_case_keys() {
    let q = QuizQuestion {
      id: "1".into(),
      question: "q".into(),
      correct_answer: "열".into(),
      wrong_answers: ["하나".into(), "둘".into(), "셋".into()],
      media: None,
      content_type: Some(ContentType::Numbers),
    };
    let v = serde_json::to_value(&q).unwrap();
    assert_eq!(v["correctAnswer"], "열");
    assert_eq!(v["wrongAnswers"][2], "셋");
    assert_eq!(v["contentType"], "numbers");
    assert!(v["media"].is_null());
  }

  #[test]
  fn stats_accumulate_with_one_decimal_average() {
    let mut stats = ProfileStats::default();
    let mut result = QuizResult {
      id: "a".into(),
      date: "2024-01-01T00:00:00Z".into(),
      title: "t".into(),
      quiz_type: QuizType::Numbers,
      score: 2,
      total_questions: 3,
      percentage: 67,
      time_taken: 1_500,
      timer_enabled: false,
      answers: vec![],
      questions: vec![],
    };
    stats.record(&result);
    result.score = 1;
    stats.record(&result);

    assert_eq!(stats.total_quizzes, 2);
    assert_eq!(stats.total_questions, 6);
    assert_eq!(stats.correct_answers, 3);
    assert_eq!(stats.wrong_answers, 3);
    assert_eq!(stats.total_time_spent, 3_000);
    assert_eq!(stats.average_score, 50.0);

    stats.record(&QuizResult { score: 0, total_questions: 1, ..result });
    // 3 / 7 = 42.857...
    assert_eq!(stats.average_score, 42.9);
  }
}
