//! Application state: in-memory draft and session stores, history store, generation settings.
//!
//! This module owns:
//!   - drafts being authored (by id), dropped once started
//!   - quiz sessions being taken (by id), dropped once saved to history
//!   - the history store (optionally file-backed)
//!   - generation settings resolved from TOML config

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::{load_quiz_config_from_env, QuizConfig};
use crate::draft::QuizDraft;
use crate::generator::GenerationSettings;
use crate::session::QuizSession;
use crate::store::HistoryStore;

#[derive(Clone)]
pub struct AppState {
  pub drafts: Arc<RwLock<HashMap<String, QuizDraft>>>,
  pub sessions: Arc<RwLock<HashMap<String, QuizSession>>>,
  pub history: Arc<HistoryStore>,
  pub settings: GenerationSettings,
  pub config: QuizConfig,
}

impl AppState {
  /// Build state from env: load config, open history, resolve generation settings.
  #[instrument(level = "info", skip_all)]
  pub async fn from_env() -> Self {
    Self::from_config(load_quiz_config_from_env()).await
  }

  pub async fn from_config(config: QuizConfig) -> Self {
    let history = match &config.storage.history_path {
      Some(path) => HistoryStore::open(path).await,
      None => {
        info!(target: "suja_backend", "No history path configured; history is in-memory only");
        HistoryStore::in_memory()
      }
    };
    Self::with_history(config, history)
  }

  /// Purely in-memory state, no file access.
  pub fn in_memory(config: QuizConfig) -> Self {
    Self::with_history(config, HistoryStore::in_memory())
  }

  fn with_history(config: QuizConfig, history: HistoryStore) -> Self {
    let settings = config.generation.settings();
    info!(
      target: "suja_backend",
      distractor_attempts = settings.distractors.perturb_attempts,
      fallback_attempts = settings.distractors.fallback_attempts,
      pick_attempts = settings.pick_attempts,
      templates = settings.templates.len(),
      "Generation settings resolved"
    );
    Self {
      drafts: Arc::new(RwLock::new(HashMap::new())),
      sessions: Arc::new(RwLock::new(HashMap::new())),
      history: Arc::new(history),
      settings,
      config,
    }
  }

  #[instrument(level = "debug", skip(self, d), fields(id = %d.id))]
  pub async fn insert_draft(&self, d: QuizDraft) {
    self.drafts.write().await.insert(d.id.clone(), d);
  }

  pub async fn remove_draft(&self, id: &str) -> Option<QuizDraft> {
    self.drafts.write().await.remove(id)
  }

  pub async fn get_draft(&self, id: &str) -> Option<QuizDraft> {
    self.drafts.read().await.get(id).cloned()
  }

  /// Run `f` against a stored draft; `None` if the id is unknown.
  pub async fn update_draft<T>(&self, id: &str, f: impl FnOnce(&mut QuizDraft) -> T) -> Option<T> {
    let mut drafts = self.drafts.write().await;
    drafts.get_mut(id).map(f)
  }

  #[instrument(level = "debug", skip(self, s), fields(id = %s.id, questions = s.questions.len()))]
  pub async fn insert_session(&self, s: QuizSession) {
    debug!(target: "session", id = %s.id, title = %s.title, "Session opened");
    self.sessions.write().await.insert(s.id.clone(), s);
  }

  pub async fn remove_session(&self, id: &str) -> Option<QuizSession> {
    self.sessions.write().await.remove(id)
  }

  pub async fn get_session(&self, id: &str) -> Option<QuizSession> {
    self.sessions.read().await.get(id).cloned()
  }

  /// Run `f` against a stored session; `None` if the id is unknown.
  pub async fn update_session<T>(&self, id: &str, f: impl FnOnce(&mut QuizSession) -> T) -> Option<T> {
    let mut sessions = self.sessions.write().await;
    sessions.get_mut(id).map(f)
  }
}
