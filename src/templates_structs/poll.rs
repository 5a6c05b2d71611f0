use askama::Template;
use chrono::{DateTime, Utc};

use crate::models::poll::{Question, QuestionDetail};
use super::PageContext;

/// A row on the index page.
pub struct QuestionListItem {
    pub question: Question,
    pub recent: bool,
}

impl QuestionListItem {
    pub fn from_question(question: Question, now: DateTime<Utc>) -> Self {
        let recent = question.was_published_recently(now);
        Self { question, recent }
    }
}

#[derive(Template)]
#[template(path = "polls/index.html")]
pub struct PollIndexTemplate {
    pub ctx: PageContext,
    pub items: Vec<QuestionListItem>,
}

#[derive(Template)]
#[template(path = "polls/detail.html")]
pub struct PollDetailTemplate {
    pub ctx: PageContext,
    pub detail: QuestionDetail,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "polls/results.html")]
pub struct PollResultsTemplate {
    pub ctx: PageContext,
    pub detail: QuestionDetail,
}
