use actix_web::{HttpResponse, web};
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::poll::PollStore;

pub const DEFAULT_SLEEP_SECS: u64 = 5;

/// GET /sleep
pub async fn sleep_default<S: PollStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    sleep_for(store.get_ref(), config.max_sleep_secs, DEFAULT_SLEEP_SECS).await
}

/// GET /sleep/{seconds}
pub async fn sleep<S: PollStore>(
    store: web::Data<S>,
    config: web::Data<AppConfig>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    sleep_for(store.get_ref(), config.max_sleep_secs, path.into_inner()).await
}

/// Load the totals, then hold the request open for `requested` seconds
/// (clamped to `max_secs`). The timer is dropped if the client goes away.
async fn sleep_for<S: PollStore>(
    store: &S,
    max_secs: u64,
    requested: u64,
) -> Result<HttpResponse, AppError> {
    let counts = store.counts().await?;
    let secs = requested.min(max_secs);
    if secs < requested {
        log::warn!("Sleep of {requested}s clamped to {secs}s");
    }
    log::info!("Sleeping for {secs}s");

    tokio::time::sleep(Duration::from_secs(secs)).await;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!(
            "I took so long to load! I slept for {secs} seconds! I have {} questions and {} answers.",
            counts.questions, counts.choices
        )))
}

/// GET /error
/// Always fails, to exercise the 500 path.
pub async fn error() -> Result<HttpResponse, AppError> {
    Err(AppError::Internal("This is a test error".to_string()))
}
