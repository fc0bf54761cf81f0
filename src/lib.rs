//! Suja · Korean numeral quiz backend.
//!
//! The core turns a numeral range, a numbering system (Sino-Korean or native
//! Korean) and an item count into multiple-choice questions with Hangul
//! answers. Around it sit quiz drafts, quiz-taking sessions, a history store
//! and an Axum HTTP + WebSocket surface.

pub mod config;
pub mod distractors;
pub mod domain;
pub mod draft;
pub mod error;
pub mod generator;
pub mod logic;
pub mod numerals;
pub mod presets;
pub mod protocol;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;

pub use distractors::generate_distractors;
pub use domain::{DigitRange, NumberSystem, QuizQuestion, QuizResult};
pub use error::GenerationError;
pub use generator::synthesize;
pub use numerals::render;
pub use session::QuizSession;
