use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::errors::AppError;
use super::store::PollStore;
use super::types::*;

const SELECT_QUESTION: &str = "SELECT id, question_text, pub_date FROM questions";
const SELECT_CHOICE: &str = "SELECT id, question_id, choice_text, votes FROM choices";

/// Postgres-backed store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PgPollStore {
    pool: PgPool,
}

impl PgPollStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PollStore for PgPollStore {
    async fn list_published(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, Question>(&format!(
            "{SELECT_QUESTION} WHERE pub_date <= $1 ORDER BY pub_date DESC, id DESC LIMIT $2"
        ))
        .bind(now)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_published(&self, id: i64, now: DateTime<Utc>) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, Question>(&format!(
            "{SELECT_QUESTION} WHERE id = $1 AND pub_date <= $2"
        ))
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTION} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn choices_for(&self, question_id: i64) -> Result<Vec<Choice>, AppError> {
        let rows = sqlx::query_as::<_, Choice>(&format!(
            "{SELECT_CHOICE} WHERE question_id = $1 ORDER BY id"
        ))
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn increment_vote(&self, choice_id: i64) -> Result<Choice, AppError> {
        // Single statement, so concurrent votes on the same row serialise on
        // the row lock instead of losing updates.
        sqlx::query_as::<_, Choice>(
            "UPDATE choices SET votes = votes + 1 WHERE id = $1 \
             RETURNING id, question_id, choice_text, votes",
        )
        .bind(choice_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn counts(&self) -> Result<PollCounts, AppError> {
        let (questions, choices): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM questions), (SELECT COUNT(*) FROM choices)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(PollCounts { questions, choices })
    }

    async fn create_question(&self, new: &NewQuestion) -> Result<Question, AppError> {
        let row = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question_text, pub_date) VALUES ($1, $2) \
             RETURNING id, question_text, pub_date",
        )
        .bind(&new.question_text)
        .bind(new.pub_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_choice(&self, question_id: i64, choice_text: &str, votes: i32) -> Result<Choice, AppError> {
        let row = sqlx::query_as::<_, Choice>(
            "INSERT INTO choices (question_id, choice_text, votes) VALUES ($1, $2, $3) \
             RETURNING id, question_id, choice_text, votes",
        )
        .bind(question_id)
        .bind(choice_text)
        .bind(votes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
