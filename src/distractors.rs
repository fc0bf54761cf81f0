//! Wrong-answer generation for numeral questions.
//!
//! Distractors are found in two passes:
//! 1) tiered perturbation of the correct value (nearby numbers are the
//!    plausible mistakes), bounded by `perturb_attempts`;
//! 2) uniform sampling over the whole range, bounded by `fallback_attempts`.
//!
//! If both passes run dry the item fails with `DistractorExhausted`.

use rand::Rng;
use tracing::debug;

use crate::domain::NumberSystem;
use crate::error::GenerationError;
use crate::numerals::{max_for, min_for, render};

pub const DISTRACTOR_COUNT: usize = 3;
pub const PERTURB_ATTEMPTS: usize = 100;
pub const FALLBACK_ATTEMPTS: usize = 10_000;

/// Upper bound of the widest perturbation tier.
const WIDE_OFFSET_CAP: u64 = 1000;

/// Attempt caps for the two search passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistractorLimits {
  pub perturb_attempts: usize,
  pub fallback_attempts: usize,
}

impl Default for DistractorLimits {
  fn default() -> Self {
    Self { perturb_attempts: PERTURB_ATTEMPTS, fallback_attempts: FALLBACK_ATTEMPTS }
  }
}

/// Three distinct wrong answers for `correct`, all inside `[min, max]`.
///
/// For native numerals the caller is expected to have clamped `max` to 99.
pub fn generate_distractors<R: Rng + ?Sized>(
  rng: &mut R,
  correct: u64,
  min: u64,
  max: u64,
  system: NumberSystem,
) -> Result<[String; DISTRACTOR_COUNT], GenerationError> {
  generate_distractors_with(rng, correct, min, max, system, DistractorLimits::default())
}

pub fn generate_distractors_with<R: Rng + ?Sized>(
  rng: &mut R,
  correct: u64,
  min: u64,
  max: u64,
  system: NumberSystem,
  limits: DistractorLimits,
) -> Result<[String; DISTRACTOR_COUNT], GenerationError> {
  let exhausted = || GenerationError::DistractorExhausted { value: correct, min, max };

  // Ranges that cannot hold three other values fail up front instead of spinning.
  if candidate_pool_size(correct, min, max, system) < DISTRACTOR_COUNT as u64 {
    return Err(exhausted());
  }

  let correct_text = render(correct, system).unwrap_or_default();
  let mut found: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);

  let accept = |candidate: u64, found: &mut Vec<String>| {
    if candidate < min || candidate > max || candidate == correct {
      return;
    }
    let Some(text) = render(candidate, system) else { return };
    if text.is_empty() || text == correct_text || found.contains(&text) {
      return;
    }
    found.push(text);
  };

  for _ in 0..limits.perturb_attempts {
    if found.len() == DISTRACTOR_COUNT {
      break;
    }
    if let Some(candidate) = perturb(rng, correct, max) {
      accept(candidate, &mut found);
    }
  }

  if found.len() < DISTRACTOR_COUNT {
    debug!(target: "generator", correct, min, max, found = found.len(), "Perturbation short; sampling whole range");
    for _ in 0..limits.fallback_attempts {
      if found.len() == DISTRACTOR_COUNT {
        break;
      }
      accept(rng.gen_range(min..=max), &mut found);
    }
  }

  <[String; DISTRACTOR_COUNT]>::try_from(found).map_err(|_| exhausted())
}

/// One tiered random offset from `correct`. `None` when it would underflow.
///
/// Bands: 30% ones (±1..9), 20% tens (±10..90), 20% hundreds (±100..900),
/// 30% wide (±1..=min(1000, max/10)).
fn perturb<R: Rng + ?Sized>(rng: &mut R, correct: u64, max: u64) -> Option<u64> {
  let roll: f64 = rng.gen();
  let offset = if roll < 0.3 {
    rng.gen_range(1..=9)
  } else if roll < 0.5 {
    10 * rng.gen_range(1..=9)
  } else if roll < 0.7 {
    100 * rng.gen_range(1..=9)
  } else {
    let wide = (max / 10).min(WIDE_OFFSET_CAP).max(1);
    rng.gen_range(1..=wide)
  };

  if rng.gen_bool(0.5) {
    correct.checked_add(offset)
  } else {
    correct.checked_sub(offset)
  }
}

/// How many representable values other than `correct` live in `[min, max]`.
fn candidate_pool_size(correct: u64, min: u64, max: u64, system: NumberSystem) -> u64 {
  let lo = min.max(min_for(system));
  let hi = max.min(max_for(system));
  if lo > hi {
    return 0;
  }
  let total = hi - lo + 1;
  if (lo..=hi).contains(&correct) { total - 1 } else { total }
}
