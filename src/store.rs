//! Quiz history and profile stats.
//!
//! Results are kept newest first behind a `RwLock`. When a path is configured
//! the whole document is rewritten as JSON after every mutation and read back
//! at startup; an unreadable file starts an empty history.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::domain::{ProfileStats, QuizResult};
use crate::error::StoreError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct HistoryDoc {
  #[serde(default)]
  history: Vec<QuizResult>,
  #[serde(default)]
  stats: ProfileStats,
}

pub struct HistoryStore {
  doc: RwLock<HistoryDoc>,
  path: Option<PathBuf>,
}

impl HistoryStore {
  pub fn in_memory() -> Self {
    Self { doc: RwLock::new(HistoryDoc::default()), path: None }
  }

  /// Load history from `path`, or start empty if it is missing or unreadable.
  #[instrument(level = "info", skip(path), fields(path = %path.display()))]
  pub async fn open(path: &Path) -> Self {
    let doc = match tokio::fs::read_to_string(path).await {
      Ok(s) => match serde_json::from_str::<HistoryDoc>(&s) {
        Ok(doc) => {
          info!(target: "history", entries = doc.history.len(), "Loaded quiz history");
          doc
        }
        Err(e) => {
          error!(target: "history", error = %e, "Failed to parse history file; starting empty");
          HistoryDoc::default()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        info!(target: "history", "No history file yet; starting empty");
        HistoryDoc::default()
      }
      Err(e) => {
        error!(target: "history", error = %e, "Failed to read history file; starting empty");
        HistoryDoc::default()
      }
    };
    Self { doc: RwLock::new(doc), path: Some(path.to_path_buf()) }
  }

  /// Store a finished quiz at the front of the history and fold it into the stats.
  #[instrument(level = "debug", skip(self, result), fields(id = %result.id))]
  pub async fn save(&self, result: QuizResult) -> Result<ProfileStats, StoreError> {
    let mut doc = self.doc.write().await;
    doc.stats.record(&result);
    doc.history.insert(0, result);
    self.persist(&doc).await?;
    Ok(doc.stats.clone())
  }

  pub async fn get(&self, id: &str) -> Option<QuizResult> {
    self.doc.read().await.history.iter().find(|r| r.id == id).cloned()
  }

  /// Every saved result, newest first.
  pub async fn list(&self) -> Vec<QuizResult> {
    self.doc.read().await.history.clone()
  }

  /// Remove one result. Stats are left untouched. Returns whether it existed.
  #[instrument(level = "debug", skip(self))]
  pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
    let mut doc = self.doc.write().await;
    let before = doc.history.len();
    doc.history.retain(|r| r.id != id);
    let removed = doc.history.len() != before;
    if removed {
      self.persist(&doc).await?;
    }
    Ok(removed)
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn clear(&self) -> Result<(), StoreError> {
    let mut doc = self.doc.write().await;
    doc.history.clear();
    self.persist(&doc).await
  }

  pub async fn stats(&self) -> ProfileStats {
    self.doc.read().await.stats.clone()
  }

  #[instrument(level = "debug", skip(self))]
  pub async fn reset_stats(&self) -> Result<(), StoreError> {
    let mut doc = self.doc.write().await;
    doc.stats = ProfileStats::default();
    self.persist(&doc).await
  }

  async fn persist(&self, doc: &HistoryDoc) -> Result<(), StoreError> {
    let Some(path) = &self.path else { return Ok(()) };
    let body = serde_json::to_string_pretty(doc)?;
    tokio::fs::write(path, body).await.map_err(|e| {
      error!(target: "history", path = %path.display(), error = %e, "Failed to write history file");
      StoreError::from(e)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuizType;
  use pretty_assertions::assert_eq;

  fn result(id: &str, score: u32, total: u32) -> QuizResult {
    QuizResult {
      id: id.into(),
      date: "2024-05-01T09:00:00+00:00".into(),
      title: format!("quiz {id}"),
      quiz_type: QuizType::Numbers,
      score,
      total_questions: total,
      percentage: score * 100 / total,
      time_taken: 10_000,
      timer_enabled: false,
      answers: vec![],
      questions: vec![],
    }
  }

  #[tokio::test]
  async fn newest_first_and_lookup() {
    let store = HistoryStore::in_memory();
    store.save(result("a", 1, 2)).await.unwrap();
    store.save(result("b", 2, 2)).await.unwrap();

    let ids: Vec<String> = store.list().await.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(store.get("a").await.unwrap().score, 1);
    assert!(store.get("zzz").await.is_none());
  }

  #[tokio::test]
  async fn delete_and_clear_keep_stats() {
    let store = HistoryStore::in_memory();
    store.save(result("a", 1, 4)).await.unwrap();
    store.save(result("b", 3, 4)).await.unwrap();

    assert!(store.delete("a").await.unwrap());
    assert!(!store.delete("a").await.unwrap());
    assert_eq!(store.list().await.len(), 1);

    store.clear().await.unwrap();
    assert!(store.list().await.is_empty());

    let stats = store.stats().await;
    assert_eq!(stats.total_quizzes, 2);
    assert_eq!(stats.correct_answers, 4);
    assert_eq!(stats.wrong_answers, 4);
    assert_eq!(stats.average_score, 50.0);

    store.reset_stats().await.unwrap();
    assert_eq!(store.stats().await, ProfileStats::default());
  }

  #[tokio::test]
  async fn persists_to_json_file() {
    let path = std::env::temp_dir().join(format!("suja-history-{}.json", uuid::Uuid::new_v4()));

    let store = HistoryStore::open(&path).await;
    assert!(store.list().await.is_empty());
    store.save(result("kept", 2, 3)).await.unwrap();

    let reopened = HistoryStore::open(&path).await;
    assert_eq!(reopened.list().await, vec![result("kept", 2, 3)]);
    assert_eq!(reopened.stats().await.total_questions, 3);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"totalQuestions\": 3"));
    let _ = std::fs::remove_file(&path);
  }

  #[tokio::test]
  async fn garbage_file_starts_empty() {
    let path = std::env::temp_dir().join(format!("suja-history-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, "not json").unwrap();
    let store = HistoryStore::open(&path).await;
    assert!(store.list().await.is_empty());
    let _ = std::fs::remove_file(&path);
  }
}
