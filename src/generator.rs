//! Numeral quiz synthesis: random values → questions with Hangul answers.
//!
//! Flow per item:
//! 1) draw a value from the effective range, avoiding values already used;
//! 2) render the correct answer and three distractors;
//! 3) phrase the question with one of the configured templates.
//!
//! The generator keeps no state between calls; the "used" set lives for one batch.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::distractors::{generate_distractors_with, DistractorLimits};
use crate::domain::{ContentType, DigitRange, NumberSystem, QuizQuestion};
use crate::error::GenerationError;
use crate::numerals::{max_for, min_for, render};
use crate::util::fill_template;

pub const PICK_ATTEMPTS: usize = 1000;
/// Largest batch one request may ask for.
pub const MAX_COUNT: usize = 100;

pub const DEFAULT_TEMPLATES: [&str; 2] = [
  "What is '{n}' in Korean?",
  "What is '{n}' in Hangul?",
];

/// Tunables for one synthesis call.
#[derive(Clone, Debug)]
pub struct GenerationSettings {
  pub distractors: DistractorLimits,
  /// Redraws allowed while a drawn value is already in the batch.
  pub pick_attempts: usize,
  /// Upper bound on `count`.
  pub max_count: usize,
  /// Question phrasings; `{n}` is replaced with the value in digits.
  pub templates: Vec<String>,
}

impl Default for GenerationSettings {
  fn default() -> Self {
    Self {
      distractors: DistractorLimits::default(),
      pick_attempts: PICK_ATTEMPTS,
      max_count: MAX_COUNT,
      templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
    }
  }
}

/// The part of `range` that `system` can actually render.
pub fn effective_range(system: NumberSystem, range: DigitRange) -> Result<DigitRange, GenerationError> {
  let min = range.min.max(min_for(system));
  let max = range.max.min(max_for(system));
  if min > max {
    return Err(GenerationError::EmptyRange { min: range.min, max: range.max, system });
  }
  Ok(DigitRange { min, max })
}

/// Generate `count` numeral questions with default settings.
pub fn synthesize<R: Rng + ?Sized>(
  rng: &mut R,
  system: NumberSystem,
  range: DigitRange,
  count: usize,
  started_at: DateTime<Utc>,
) -> Result<Vec<QuizQuestion>, GenerationError> {
  synthesize_with(rng, system, range, count, started_at, &GenerationSettings::default())
}

pub fn synthesize_with<R: Rng + ?Sized>(
  rng: &mut R,
  system: NumberSystem,
  range: DigitRange,
  count: usize,
  started_at: DateTime<Utc>,
  settings: &GenerationSettings,
) -> Result<Vec<QuizQuestion>, GenerationError> {
  if count == 0 || count > settings.max_count {
    return Err(GenerationError::InvalidCount { max: settings.max_count });
  }
  let effective = effective_range(system, range)?;
  let stamp = started_at.timestamp_millis();

  let mut used: HashSet<u64> = HashSet::with_capacity(count);
  let mut batch = Vec::with_capacity(count);

  for index in 0..count {
    let value = pick_value(rng, effective, &mut used, settings.pick_attempts);

    let correct_answer = render(value, system)
      .ok_or(GenerationError::EmptyRange { min: range.min, max: range.max, system })?;
    let wrong_answers = generate_distractors_with(
      rng,
      value,
      effective.min,
      effective.max,
      system,
      settings.distractors,
    )?;

    let template = settings
      .templates
      .choose(rng)
      .map(String::as_str)
      .unwrap_or(DEFAULT_TEMPLATES[0]);
    let question = fill_template(template, &[("n", &value.to_string())]);

    batch.push(QuizQuestion {
      id: format!("num-{}-{}", stamp, index),
      question,
      correct_answer,
      wrong_answers,
      media: None,
      content_type: Some(ContentType::Numbers),
    });
  }

  debug!(target: "generator", %system, %range, count, distinct = used.len(), "Synthesized numeral batch");
  Ok(batch)
}

/// Draw a value not yet in `used`; after `attempts` misses accept a repeat.
fn pick_value<R: Rng + ?Sized>(
  rng: &mut R,
  range: DigitRange,
  used: &mut HashSet<u64>,
  attempts: usize,
) -> u64 {
  let mut candidate = rng.gen_range(range.min..=range.max);
  for _ in 0..attempts {
    if !used.contains(&candidate) {
      break;
    }
    candidate = rng.gen_range(range.min..=range.max);
  }
  if !used.insert(candidate) {
    warn!(target: "generator", value = candidate, %range, "Range exhausted; repeating a value");
  }
  candidate
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use NumberSystem::{NativeKorean, SinoKorean};

  const NATIVE_ONE_TO_TEN: [&str; 10] =
    ["하나", "둘", "셋", "넷", "다섯", "여섯", "일곱", "여덟", "아홉", "열"];

  fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-01T09:00:00Z").unwrap().with_timezone(&Utc)
  }

  #[test]
  fn native_one_to_ten_batch() {
    let mut rng = StdRng::seed_from_u64(11);
    let batch = synthesize(&mut rng, NativeKorean, "1-10".parse().unwrap(), 5, now()).unwrap();
    assert_eq!(batch.len(), 5);

    let ids: HashSet<&str> = batch.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 5);

    for q in &batch {
      assert!(NATIVE_ONE_TO_TEN.contains(&q.correct_answer.as_str()), "{}", q.correct_answer);
      for wrong in &q.wrong_answers {
        assert_ne!(wrong, &q.correct_answer);
        assert!(NATIVE_ONE_TO_TEN.contains(&wrong.as_str()));
      }
      assert_eq!(q.content_type, Some(ContentType::Numbers));
    }

    // Five distinct values out of ten.
    let answers: HashSet<&str> = batch.iter().map(|q| q.correct_answer.as_str()).collect();
    assert_eq!(answers.len(), 5);
  }

  #[test]
  fn sino_batch_has_no_duplicates_when_range_allows() {
    let mut rng = StdRng::seed_from_u64(5);
    let batch = synthesize(&mut rng, SinoKorean, DigitRange::new(1, 100), 10, now()).unwrap();
    assert_eq!(batch.len(), 10);
    let answers: HashSet<&str> = batch.iter().map(|q| q.correct_answer.as_str()).collect();
    assert_eq!(answers.len(), 10);
  }

  #[test]
  fn question_text_uses_one_of_two_templates() {
    let mut rng = StdRng::seed_from_u64(99);
    let batch = synthesize(&mut rng, SinoKorean, DigitRange::new(1, 1_000_000), 20, now()).unwrap();
    let mut saw_korean = false;
    let mut saw_hangul = false;
    for q in &batch {
      assert!(q.question.starts_with("What is '"), "{}", q.question);
      saw_korean |= q.question.ends_with("' in Korean?");
      saw_hangul |= q.question.ends_with("' in Hangul?");
      let digits: String = q.question.chars().filter(|c| c.is_ascii_digit()).collect();
      let n: u64 = digits.parse().unwrap();
      assert_eq!(render(n, SinoKorean).unwrap(), q.correct_answer);
    }
    assert!(saw_korean && saw_hangul);
  }

  #[test]
  fn ids_stay_unique_when_values_repeat() {
    let mut rng = StdRng::seed_from_u64(2);
    let batch = synthesize(&mut rng, SinoKorean, DigitRange::new(1, 5), 10, now()).unwrap();
    assert_eq!(batch.len(), 10);
    let ids: HashSet<&str> = batch.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 10);
    assert!(batch[0].id.starts_with(&format!("num-{}-", now().timestamp_millis())));
  }

  #[test]
  fn native_range_is_clamped_to_ninety_nine() {
    let mut rng = StdRng::seed_from_u64(8);
    let batch = synthesize(&mut rng, NativeKorean, DigitRange::new(1, 100_000_000), 15, now()).unwrap();
    for q in &batch {
      assert!(!q.correct_answer.is_empty());
      assert!((1..=99).any(|n| render(n, NativeKorean).as_deref() == Some(q.correct_answer.as_str())));
    }
  }

  #[test]
  fn rejects_empty_count_and_empty_range() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
      synthesize(&mut rng, SinoKorean, DigitRange::new(1, 10), 0, now()).unwrap_err(),
      GenerationError::InvalidCount { max: MAX_COUNT }
    );
    assert!(matches!(
      synthesize(&mut rng, NativeKorean, DigitRange::new(100, 200), 5, now()).unwrap_err(),
      GenerationError::EmptyRange { .. }
    ));
    assert!(matches!(
      synthesize(&mut rng, SinoKorean, DigitRange::new(1, 3), 1, now()).unwrap_err(),
      GenerationError::DistractorExhausted { .. }
    ));
  }

  #[test]
  fn oversized_count_is_rejected_before_allocating() {
    let mut rng = StdRng::seed_from_u64(2);
    assert_eq!(
      synthesize(&mut rng, SinoKorean, DigitRange::new(1, 100), usize::MAX / 2, now()).unwrap_err(),
      GenerationError::InvalidCount { max: MAX_COUNT }
    );
    assert_eq!(
      synthesize(&mut rng, SinoKorean, DigitRange::new(1, 100), MAX_COUNT + 1, now()).unwrap_err(),
      GenerationError::InvalidCount { max: MAX_COUNT }
    );
    assert_eq!(synthesize(&mut rng, SinoKorean, DigitRange::new(1, 1000), MAX_COUNT, now()).unwrap().len(), MAX_COUNT);

    let settings = GenerationSettings { max_count: 3, ..GenerationSettings::default() };
    assert_eq!(
      synthesize_with(&mut rng, SinoKorean, DigitRange::new(1, 100), 4, now(), &settings).unwrap_err(),
      GenerationError::InvalidCount { max: 3 }
    );
  }

  #[test]
  fn same_seed_same_batch() {
    let a = synthesize(&mut StdRng::seed_from_u64(77), SinoKorean, DigitRange::new(1, 10_000), 10, now()).unwrap();
    let b = synthesize(&mut StdRng::seed_from_u64(77), SinoKorean, DigitRange::new(1, 10_000), 10, now()).unwrap();
    assert_eq!(a, b);
  }
}
