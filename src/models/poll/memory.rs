use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::AppError;
use super::store::PollStore;
use super::types::*;

#[derive(Debug, Default)]
struct Tables {
    questions: Vec<Question>,
    choices: Vec<Choice>,
    next_question_id: i64,
    next_choice_id: i64,
}

/// In-process store used when no database is configured, and by tests.
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryPollStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PollStore for MemoryPollStore {
    async fn list_published(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Question>, AppError> {
        let tables = self.lock();
        let mut published: Vec<Question> = tables
            .questions
            .iter()
            .filter(|q| q.is_published(now))
            .cloned()
            .collect();
        published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        published.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(published)
    }

    async fn find_published(&self, id: i64, now: DateTime<Utc>) -> Result<Option<Question>, AppError> {
        let tables = self.lock();
        Ok(tables
            .questions
            .iter()
            .find(|q| q.id == id && q.is_published(now))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Question>, AppError> {
        let tables = self.lock();
        Ok(tables.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn choices_for(&self, question_id: i64) -> Result<Vec<Choice>, AppError> {
        let tables = self.lock();
        Ok(tables
            .choices
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn increment_vote(&self, choice_id: i64) -> Result<Choice, AppError> {
        let mut tables = self.lock();
        let choice = tables
            .choices
            .iter_mut()
            .find(|c| c.id == choice_id)
            .ok_or(AppError::NotFound)?;
        choice.votes = choice
            .votes
            .checked_add(1)
            .ok_or_else(|| AppError::Internal(format!("vote count overflow on choice {choice_id}")))?;
        Ok(choice.clone())
    }

    async fn counts(&self) -> Result<PollCounts, AppError> {
        let tables = self.lock();
        Ok(PollCounts {
            questions: tables.questions.len() as i64,
            choices: tables.choices.len() as i64,
        })
    }

    async fn create_question(&self, new: &NewQuestion) -> Result<Question, AppError> {
        let mut tables = self.lock();
        tables.next_question_id += 1;
        let question = Question {
            id: tables.next_question_id,
            question_text: new.question_text.clone(),
            pub_date: new.pub_date,
        };
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn create_choice(&self, question_id: i64, choice_text: &str, votes: i32) -> Result<Choice, AppError> {
        let mut tables = self.lock();
        if !tables.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::NotFound);
        }
        if votes < 0 {
            return Err(AppError::Internal(format!("negative vote count {votes}")));
        }
        tables.next_choice_id += 1;
        let choice = Choice {
            id: tables.next_choice_id,
            question_id,
            choice_text: choice_text.to_string(),
            votes,
        };
        tables.choices.push(choice.clone());
        Ok(choice)
    }
}
