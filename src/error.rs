//! Error types: domain failures from the core, and `ApiError` for the HTTP edge.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::NumberSystem;

/// Failures while generating numeral questions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
  #[error("invalid range '{0}', expected '<min>-<max>' with min <= max")]
  InvalidRange(String),

  #[error("unknown number system '{0}', expected 'sino' or 'native'")]
  UnknownSystem(String),

  #[error("question count must be between 1 and {max}")]
  InvalidCount { max: usize },

  #[error("range {min}-{max} has no values representable in {system}")]
  EmptyRange { min: u64, max: u64, system: NumberSystem },

  #[error("could not find 3 distractors for {value} within {min}-{max}")]
  DistractorExhausted { value: u64, min: u64, max: u64 },
}

/// Problems that keep a draft from being started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
  #[error("quiz title is empty")]
  MissingTitle,

  #[error("question {index} is incomplete")]
  IncompleteQuestion { index: usize },

  #[error("quiz has no questions")]
  NoQuestions,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
  #[error("a quiz session needs at least one question")]
  NoQuestions,

  #[error("quiz session is not completed yet")]
  NotCompleted,
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("history io: {0}")]
  Io(#[from] std::io::Error),

  #[error("history encoding: {0}")]
  Json(#[from] serde_json::Error),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Bad request: {0}")]
  BadRequest(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
  error: String,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error_type) = match &self {
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
      ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
      ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    let body = Json(ErrorResponse {
      error: error_type.to_string(),
      message: self.to_string(),
    });

    (status, body).into_response()
  }
}

impl From<GenerationError> for ApiError {
  fn from(e: GenerationError) -> Self {
    match e {
      // The range is valid but too narrow for three distractors.
      GenerationError::DistractorExhausted { .. } => ApiError::Conflict(e.to_string()),
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl From<DraftError> for ApiError {
  fn from(e: DraftError) -> Self {
    ApiError::BadRequest(e.to_string())
  }
}

impl From<SessionError> for ApiError {
  fn from(e: SessionError) -> Self {
    match e {
      SessionError::NoQuestions => ApiError::BadRequest(e.to_string()),
      SessionError::NotCompleted => ApiError::Conflict(e.to_string()),
    }
  }
}

impl From<StoreError> for ApiError {
  fn from(e: StoreError) -> Self {
    ApiError::Internal(e.to_string())
  }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
