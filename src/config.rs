//! Loading quiz configuration (generation limits, timer defaults, storage) from TOML.
//!
//! See `QuizConfig` for the expected schema. Every section and key is optional:
//!
//! ```toml
//! [generation]
//! distractor_attempts = 100
//! fallback_attempts = 10000
//! pick_attempts = 1000
//! max_count = 100
//! question_templates = ["What is '{n}' in Korean?", "What is '{n}' in Hangul?"]
//!
//! [quiz]
//! default_timer_seconds = 30
//!
//! [storage]
//! history_path = "quiz_history.json"
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::distractors::{DistractorLimits, FALLBACK_ATTEMPTS, PERTURB_ATTEMPTS};
use crate::draft::DEFAULT_TIMER_SECONDS;
use crate::generator::{GenerationSettings, DEFAULT_TEMPLATES, MAX_COUNT, PICK_ATTEMPTS};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct QuizConfig {
  #[serde(default)]
  pub generation: GenerationCfg,
  #[serde(default)]
  pub quiz: QuizCfg,
  #[serde(default)]
  pub storage: StorageCfg,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GenerationCfg {
  pub distractor_attempts: usize,
  pub fallback_attempts: usize,
  pub pick_attempts: usize,
  pub max_count: usize,
  pub question_templates: Vec<String>,
}

impl Default for GenerationCfg {
  fn default() -> Self {
    Self {
      distractor_attempts: PERTURB_ATTEMPTS,
      fallback_attempts: FALLBACK_ATTEMPTS,
      pick_attempts: PICK_ATTEMPTS,
      max_count: MAX_COUNT,
      question_templates: DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect(),
    }
  }
}

impl GenerationCfg {
  pub fn settings(&self) -> GenerationSettings {
    let templates = if self.question_templates.is_empty() {
      GenerationSettings::default().templates
    } else {
      self.question_templates.clone()
    };
    GenerationSettings {
      distractors: DistractorLimits {
        perturb_attempts: self.distractor_attempts,
        fallback_attempts: self.fallback_attempts,
      },
      pick_attempts: self.pick_attempts,
      max_count: self.max_count,
      templates,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizCfg {
  /// Per-question seconds used when a draft or retake does not say otherwise.
  pub default_timer_seconds: u32,
}

impl Default for QuizCfg {
  fn default() -> Self {
    Self { default_timer_seconds: DEFAULT_TIMER_SECONDS }
  }
}

#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct StorageCfg {
  /// JSON file for history + stats. In-memory only when unset.
  pub history_path: Option<PathBuf>,
}

/// Load `QuizConfig` from QUIZ_CONFIG_PATH, then apply HISTORY_PATH.
/// Any IO/parse error falls back to defaults.
pub fn load_quiz_config_from_env() -> QuizConfig {
  let mut cfg = match std::env::var("QUIZ_CONFIG_PATH") {
    Ok(path) => read_config(&path).unwrap_or_default(),
    Err(_) => QuizConfig::default(),
  };
  if let Ok(p) = std::env::var("HISTORY_PATH") {
    if !p.trim().is_empty() {
      cfg.storage.history_path = Some(PathBuf::from(p));
    }
  }
  cfg
}

fn read_config(path: &str) -> Option<QuizConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<QuizConfig>(&s) {
      Ok(cfg) => {
        info!(target: "suja_backend", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "suja_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "suja_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
