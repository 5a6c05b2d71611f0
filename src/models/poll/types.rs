use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// A poll prompt. Visible on the index and detail pages once `pub_date` has passed.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    /// Published at or before `now`.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    /// Published within the last day, and not in the future.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i32,
}

impl Choice {
    pub fn votes_label(&self) -> &'static str {
        if self.votes == 1 { "vote" } else { "votes" }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

/// A question together with its choices, as shown on detail and results pages.
#[derive(Debug, Clone)]
pub struct QuestionDetail {
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl QuestionDetail {
    pub fn find_choice(&self, choice_id: i64) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

/// New question data for creation.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

/// Totals across the whole store, unfiltered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollCounts {
    pub questions: i64,
    pub choices: i64,
}

/// Form data posted to `/{id}/vote/`. The field is optional so a missing
/// selection re-renders the form instead of failing extraction.
#[derive(Debug, Default)]
pub struct VoteForm {
    pub choice: Option<String>,
}

impl VoteForm {
    /// Build from decoded form pairs. A repeated `choice` keeps the last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let choice = pairs
            .into_iter()
            .filter(|(key, _)| key == "choice")
            .map(|(_, value)| value)
            .last();
        Self { choice }
    }

    /// The selected choice id, if one was submitted and is an integer.
    pub fn choice_id(&self) -> Option<i64> {
        self.choice.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}
