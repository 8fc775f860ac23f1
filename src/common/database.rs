use std::str::FromStr;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::debug;

use crate::{common::error::StoreError, config::config::CONFIG};

const CREATE_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id TEXT PRIMARY KEY,
    type TEXT NOT NULL,
    prompt TEXT NOT NULL,
    difficulty INTEGER NOT NULL,
    answer TEXT NOT NULL,
    hint TEXT,
    time_limit_ms INTEGER NOT NULL,
    options_json TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#;

const CREATE_QUIZZES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS quizzes (
    id TEXT PRIMARY KEY,
    status TEXT NOT NULL,
    current_index INTEGER NOT NULL,
    score INTEGER NOT NULL,
    completed BOOLEAN NOT NULL,
    start_time TIMESTAMP NOT NULL,
    creation_date TIMESTAMP NOT NULL,
    time_taken_ms INTEGER NOT NULL,
    correct_count INTEGER NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)"#;

const CREATE_QUIZ_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS quiz_questions (
    quiz_id TEXT NOT NULL,
    question_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    FOREIGN KEY (quiz_id) REFERENCES quizzes(id),
    FOREIGN KEY (question_id) REFERENCES questions(id),
    PRIMARY KEY (quiz_id, position)
)"#;

const CREATE_QUIZ_HISTORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS quiz_history (
    quiz_id TEXT NOT NULL,
    question_id TEXT NOT NULL,
    seq INTEGER NOT NULL,
    correct BOOLEAN NOT NULL,
    time_taken_ms INTEGER NOT NULL,
    FOREIGN KEY (quiz_id) REFERENCES quizzes(id),
    FOREIGN KEY (question_id) REFERENCES questions(id),
    PRIMARY KEY (quiz_id, seq)
)"#;

/// Owns the SQLite pool the persistence adapters run their queries on.
/// Connecting pings the store and bootstraps the schema.
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub async fn connect(connection_string: &str) -> Result<Self, StoreError> {
        // Foreign keys stay declarative only: a session may be saved before
        // its questions exist (the gap surfaces as NotFound on load), and
        // deleting a question referenced by a saved quiz must succeed.
        let options = SqliteConnectOptions::from_str(connection_string)
            .map_err(|e| StoreError::Connection(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(false);

        // Single-writer model, and keeps `sqlite::memory:` on one connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        create_tables(&pool).await?;
        debug!("Database ready at {}", connection_string);

        Ok(Self { pool })
    }

    pub async fn from_env() -> Result<Self, StoreError> {
        Self::connect(&CONFIG.database_url).await
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn create_tables(pool: &Pool<Sqlite>) -> Result<(), StoreError> {
    for statement in [
        CREATE_QUESTIONS_TABLE,
        CREATE_QUIZZES_TABLE,
        CREATE_QUIZ_QUESTIONS_TABLE,
        CREATE_QUIZ_HISTORY_TABLE,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
