use actix_web::{HttpResponse, http::header, web};
use chrono::Utc;

use crate::errors::{AppError, render};
use crate::models::poll::{PollStore, QuestionDetail, VoteForm};
use crate::templates_structs::{
    PageContext, PollDetailTemplate, PollIndexTemplate, PollResultsTemplate, QuestionListItem,
};

/// How many questions the index page lists.
pub const LATEST_LIMIT: i64 = 5;

pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

fn detail_page(detail: QuestionDetail, error_message: Option<&str>) -> PollDetailTemplate {
    PollDetailTemplate {
        ctx: PageContext::new(detail.question.question_text.clone()),
        detail,
        error_message: error_message.map(str::to_string),
    }
}

/// GET /
/// The latest published questions, newest first.
pub async fn index<S: PollStore>(store: web::Data<S>) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let questions = store.list_published(now, LATEST_LIMIT).await?;
    let items = questions
        .into_iter()
        .map(|q| QuestionListItem::from_question(q, now))
        .collect();

    render(PollIndexTemplate {
        ctx: PageContext::new("Latest polls"),
        items,
    })
}

/// GET /{id}/
/// Voting form. Unpublished questions are reported as not found.
pub async fn detail<S: PollStore>(
    store: web::Data<S>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let question = store
        .find_published(id, Utc::now())
        .await?
        .ok_or(AppError::NotFound)?;
    let detail = store.load_detail(question).await?;
    render(detail_page(detail, None))
}

/// POST /{id}/vote/
/// Records one vote and redirects to the results page. A missing or foreign
/// choice re-renders the form with an error instead.
pub async fn vote<S: PollStore>(
    store: web::Data<S>,
    path: web::Path<i64>,
    form: Option<web::Form<Vec<(String, String)>>>,
) -> Result<HttpResponse, AppError> {
    let question_id = path.into_inner();
    let question = store
        .find_by_id(question_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let detail = store.load_detail(question).await?;

    let form = form
        .map(|f| VoteForm::from_pairs(f.into_inner()))
        .unwrap_or_default();
    let selected = form
        .choice_id()
        .and_then(|choice_id| detail.find_choice(choice_id))
        .map(|choice| choice.id);

    let Some(choice_id) = selected else {
        log::info!(
            "Rejected vote on question {question_id}: choice {:?} not found",
            form.choice
        );
        return render(detail_page(detail, Some(NO_CHOICE_MESSAGE)));
    };

    let choice = store.increment_vote(choice_id).await?;
    log::debug!(
        "Vote recorded: question={question_id} choice={} votes={}",
        choice.id,
        choice.votes
    );

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/{question_id}/results/")))
        .finish())
}

/// GET /{id}/results/
/// No publication filter here, unlike the detail page.
pub async fn results<S: PollStore>(
    store: web::Data<S>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let question = store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    let detail = store.load_detail(question).await?;

    render(PollResultsTemplate {
        ctx: PageContext::new(format!("Results: {}", detail.question)),
        detail,
    })
}
