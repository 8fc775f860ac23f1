//! Quiz-taking engine with SQLite persistence.
//!
//! Questions come in three variants (multiple-choice, true/false and
//! fill-in-the-blank), are assembled into a [`QuizSession`] that tracks
//! progress, score and answer history, and are persisted through the
//! adapters in [`question::db`] and [`quiz::db`].

pub use crate::common::database::Database;
pub use crate::common::error::StoreError;
pub use crate::question::models::Question;
pub use crate::quiz::models::{QuizSession, QuizStatus};

pub mod common;
pub mod config;
pub mod question;
pub mod quiz;

#[cfg(test)]
mod tests;
