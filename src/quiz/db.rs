use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite, Transaction};
use tracing::error;

use crate::{
    common::error::StoreError,
    question,
    quiz::models::{QuestionResult, QuizSession, QuizStatus},
};

/// Persists the whole session in one transaction: scalar row upsert, then a
/// delete-and-reinsert of the question references and the answer history. A
/// failure in any step rolls the whole save back.
pub async fn save_quiz(pool: &Pool<Sqlite>, session: &QuizSession) -> Result<(), StoreError> {
    let mut tx = pool.begin().await.map_err(|e| StoreError::Transaction {
        op: "begin quiz save",
        source: e,
    })?;

    upsert_quiz_row(&mut tx, session).await?;
    replace_quiz_questions(&mut tx, session).await?;
    replace_quiz_history(&mut tx, session).await?;

    tx.commit().await.map_err(|e| {
        error!("Failed to commit save of quiz {}", session.id());
        StoreError::Transaction {
            op: "commit quiz save",
            source: e,
        }
    })?;

    Ok(())
}

async fn upsert_quiz_row(
    tx: &mut Transaction<'_, Sqlite>,
    session: &QuizSession,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO quizzes (id, status, current_index, score, completed, start_time, creation_date, time_taken_ms, correct_count)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            status = excluded.status,
            current_index = excluded.current_index,
            score = excluded.score,
            completed = excluded.completed,
            time_taken_ms = excluded.time_taken_ms,
            correct_count = excluded.correct_count
        "#,
    )
    .bind(session.id())
    .bind(session.status().as_str())
    .bind(session.current_index() as i64)
    .bind(session.score() as i64)
    .bind(session.is_completed())
    .bind(session.start_time())
    .bind(session.creation_date())
    .bind(session.time_taken().as_millis() as i64)
    .bind(session.correct_count() as i64)
    .execute(&mut **tx)
    .await
    .map_err(|e| StoreError::Transaction {
        op: "upsert quiz row",
        source: e,
    })?;

    Ok(())
}

async fn replace_quiz_questions(
    tx: &mut Transaction<'_, Sqlite>,
    session: &QuizSession,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        DELETE FROM quiz_questions
        WHERE quiz_id = ?
        "#,
    )
    .bind(session.id())
    .execute(&mut **tx)
    .await
    .map_err(|e| StoreError::Transaction {
        op: "clear quiz questions",
        source: e,
    })?;

    for (position, question) in session.questions().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO quiz_questions (quiz_id, question_id, position)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(session.id())
        .bind(question.id())
        .bind(position as i64)
        .execute(&mut **tx)
        .await
        .map_err(|e| StoreError::Transaction {
            op: "insert quiz question",
            source: e,
        })?;
    }

    Ok(())
}

async fn replace_quiz_history(
    tx: &mut Transaction<'_, Sqlite>,
    session: &QuizSession,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        DELETE FROM quiz_history
        WHERE quiz_id = ?
        "#,
    )
    .bind(session.id())
    .execute(&mut **tx)
    .await
    .map_err(|e| StoreError::Transaction {
        op: "clear quiz history",
        source: e,
    })?;

    for (seq, result) in session.history().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO quiz_history (quiz_id, question_id, seq, correct, time_taken_ms)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.id())
        .bind(&result.question_id)
        .bind(seq as i64)
        .bind(result.correct)
        .bind(result.time_taken.as_millis() as i64)
        .execute(&mut **tx)
        .await
        .map_err(|e| StoreError::Transaction {
            op: "insert quiz history",
            source: e,
        })?;
    }

    Ok(())
}

pub async fn get_quiz(pool: &Pool<Sqlite>, id: &str) -> Result<QuizSession, StoreError> {
    let row = sqlx::query(
        r#"
        SELECT status, current_index, score, completed, start_time, creation_date, time_taken_ms, correct_count
        FROM quizzes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound(format!(
        "Quiz with id {} does not exist",
        id
    )))?;

    let status_tag: String = row.try_get("status")?;
    let status = QuizStatus::from_tag(&status_tag).ok_or_else(|| {
        StoreError::Corrupt(format!("Quiz {} has unknown status {}", id, status_tag))
    })?;

    let current_index: i64 = row.try_get("current_index")?;
    let score: i64 = row.try_get("score")?;
    let completed: bool = row.try_get("completed")?;
    let start_time: DateTime<Utc> = row.try_get("start_time")?;
    let creation_date: DateTime<Utc> = row.try_get("creation_date")?;
    let time_taken_ms: i64 = row.try_get("time_taken_ms")?;
    let correct_count: i64 = row.try_get("correct_count")?;

    let question_rows = sqlx::query(
        r#"
        SELECT question_id
        FROM quiz_questions
        WHERE quiz_id = ?
        ORDER BY position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let mut questions = Vec::with_capacity(question_rows.len());
    for question_row in question_rows {
        let question_id: String = question_row.try_get("question_id")?;
        questions.push(question::db::get_question(pool, &question_id).await?);
    }

    let history_rows = sqlx::query(
        r#"
        SELECT question_id, correct, time_taken_ms
        FROM quiz_history
        WHERE quiz_id = ?
        ORDER BY seq
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let mut history = Vec::with_capacity(history_rows.len());
    for history_row in history_rows {
        let question_id: String = history_row.try_get("question_id")?;
        let correct: bool = history_row.try_get("correct")?;
        let taken_ms: i64 = history_row.try_get("time_taken_ms")?;

        history.push(QuestionResult {
            question_id,
            correct,
            time_taken: Duration::from_millis(taken_ms as u64),
        });
    }

    Ok(QuizSession::restore(
        id.to_string(),
        questions,
        current_index as usize,
        score as u32,
        completed,
        status,
        start_time,
        creation_date,
        Duration::from_millis(time_taken_ms as u64),
        correct_count as u32,
        history,
    ))
}

pub async fn delete_quiz(pool: &Pool<Sqlite>, id: &str) -> Result<(), StoreError> {
    let mut tx = pool.begin().await.map_err(|e| StoreError::Transaction {
        op: "begin quiz delete",
        source: e,
    })?;

    for statement in [
        "DELETE FROM quiz_history WHERE quiz_id = ?",
        "DELETE FROM quiz_questions WHERE quiz_id = ?",
        "DELETE FROM quizzes WHERE id = ?",
    ] {
        sqlx::query(statement)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Transaction {
                op: "delete quiz rows",
                source: e,
            })?;
    }

    tx.commit().await.map_err(|e| StoreError::Transaction {
        op: "commit quiz delete",
        source: e,
    })?;

    Ok(())
}

/// All sessions, newest first, each fully reconstructed.
pub async fn list_quizzes(pool: &Pool<Sqlite>) -> Result<Vec<QuizSession>, StoreError> {
    let rows = sqlx::query(
        r#"
        SELECT id
        FROM quizzes
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut quizzes = Vec::with_capacity(rows.len());
    for row in rows {
        let id: String = row.try_get("id")?;
        quizzes.push(get_quiz(pool, &id).await?);
    }

    Ok(quizzes)
}
