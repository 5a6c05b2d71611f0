use chrono::{DateTime, Utc};
use std::future::Future;

use crate::errors::AppError;
use super::types::*;

/// Everything the poll handlers need from persistence.
///
/// Lookups return `Ok(None)` for a missing row; handlers decide whether that
/// means a 404 or an in-page error.
pub trait PollStore: Send + Sync + 'static {
    /// Questions with `pub_date <= now`, newest first, at most `limit`.
    fn list_published(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Question>, AppError>> + Send;

    /// A question by id, only if it is published at `now`.
    fn find_published(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<Question>, AppError>> + Send;

    /// A question by id regardless of its publication date.
    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<Question>, AppError>> + Send;

    /// Choices of a question, in creation order.
    fn choices_for(&self, question_id: i64) -> impl Future<Output = Result<Vec<Choice>, AppError>> + Send;

    /// Add one vote to a choice and return its new state.
    /// Fails with `NotFound` if the choice does not exist.
    fn increment_vote(&self, choice_id: i64) -> impl Future<Output = Result<Choice, AppError>> + Send;

    fn counts(&self) -> impl Future<Output = Result<PollCounts, AppError>> + Send;

    fn create_question(&self, new: &NewQuestion) -> impl Future<Output = Result<Question, AppError>> + Send;

    fn create_choice(
        &self,
        question_id: i64,
        choice_text: &str,
        votes: i32,
    ) -> impl Future<Output = Result<Choice, AppError>> + Send;

    /// Attach the question's choices.
    fn load_detail(&self, question: Question) -> impl Future<Output = Result<QuestionDetail, AppError>> + Send {
        async move {
            let choices = self.choices_for(question.id).await?;
            Ok(QuestionDetail { question, choices })
        }
    }
}
