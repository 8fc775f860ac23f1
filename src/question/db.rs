use std::time::Duration;

use sqlx::{Pool, Row, Sqlite};

use crate::{
    common::error::StoreError,
    question::models::{FillIn, MultiChoice, Question, QuestionKind, TrueFalse},
};

pub async fn save_question(pool: &Pool<Sqlite>, question: &Question) -> Result<(), StoreError> {
    let options_json = match question {
        Question::MultiChoice(q) => Some(serde_json::to_string(&q.options).map_err(|e| {
            StoreError::Corrupt(format!(
                "Failed to encode options for question {}: {}",
                q.id, e
            ))
        })?),
        _ => None,
    };

    sqlx::query(
        r#"
        INSERT INTO questions (id, type, prompt, difficulty, answer, hint, time_limit_ms, options_json)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            type = excluded.type,
            prompt = excluded.prompt,
            difficulty = excluded.difficulty,
            answer = excluded.answer,
            hint = excluded.hint,
            time_limit_ms = excluded.time_limit_ms,
            options_json = excluded.options_json
        "#,
    )
    .bind(question.id())
    .bind(question.kind().as_str())
    .bind(question.prompt())
    .bind(question.difficulty() as i64)
    .bind(question.answer_text())
    .bind(question.hint())
    .bind(question.time_limit().as_millis() as i64)
    .bind(options_json)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_question(pool: &Pool<Sqlite>, id: &str) -> Result<Question, StoreError> {
    let row = sqlx::query(
        r#"
        SELECT type, prompt, difficulty, answer, hint, time_limit_ms, options_json
        FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound(format!(
        "Question with id {} does not exist",
        id
    )))?;

    let tag: String = row.try_get("type")?;
    let prompt: String = row.try_get("prompt")?;
    let difficulty: i64 = row.try_get("difficulty")?;
    let answer: String = row.try_get("answer")?;
    let hint: Option<String> = row.try_get("hint")?;
    let time_limit_ms: i64 = row.try_get("time_limit_ms")?;
    let options_json: Option<String> = row.try_get("options_json")?;

    let kind = QuestionKind::from_tag(&tag).ok_or_else(|| {
        StoreError::UnknownVariant(format!("Question {} has unknown type {}", id, tag))
    })?;

    let difficulty = difficulty as u32;
    let time_limit = Duration::from_millis(time_limit_ms as u64);

    let question = match kind {
        QuestionKind::MultiChoice => {
            let raw = options_json.ok_or_else(|| {
                StoreError::Corrupt(format!("Question {} is missing its options", id))
            })?;
            let options: Vec<String> = serde_json::from_str(&raw).map_err(|e| {
                StoreError::Corrupt(format!(
                    "Failed to decode options for question {}: {}",
                    id, e
                ))
            })?;

            Question::MultiChoice(MultiChoice {
                id: id.to_string(),
                prompt,
                options,
                difficulty,
                answer,
                hint,
                time_limit,
            })
        }
        QuestionKind::TrueFalse => Question::TrueFalse(TrueFalse {
            id: id.to_string(),
            prompt,
            difficulty,
            answer: answer == "true",
            hint,
            time_limit,
        }),
        QuestionKind::FillIn => Question::FillIn(FillIn {
            id: id.to_string(),
            prompt,
            difficulty,
            answer,
            hint,
            time_limit,
        }),
    };

    Ok(question)
}

/// Idempotent, deleting an absent id is not an error.
pub async fn delete_question(pool: &Pool<Sqlite>, id: &str) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        DELETE FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// All questions, newest first. Reconstructs each row through
/// [`get_question`], one round trip per question.
pub async fn list_questions(pool: &Pool<Sqlite>) -> Result<Vec<Question>, StoreError> {
    let rows = sqlx::query(
        r#"
        SELECT id
        FROM questions
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut questions = Vec::with_capacity(rows.len());
    for row in rows {
        let id: String = row.try_get("id")?;
        questions.push(get_question(pool, &id).await?);
    }

    Ok(questions)
}
