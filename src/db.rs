use chrono::{Duration, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::errors::AppError;
use crate::models::poll::{NewQuestion, PollStore};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const DEMO_SEED: &str = include_str!("../data/seed/polls.json");

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SeedPayload {
    questions: Vec<SeedQuestion>,
}

#[derive(Debug, Deserialize)]
struct SeedQuestion {
    question_text: String,
    /// Publication date relative to seeding time; negative is in the past.
    pub_offset_days: i64,
    #[serde(default)]
    choices: Vec<SeedChoice>,
}

#[derive(Debug, Deserialize)]
struct SeedChoice {
    choice_text: String,
    #[serde(default)]
    votes: i32,
}

/// Load the bundled demo polls if the store holds no questions yet.
/// Returns the number of questions created.
pub async fn seed_demo_data<S: PollStore>(store: &S) -> Result<usize, AppError> {
    let existing = store.counts().await?;
    if existing.questions > 0 {
        log::info!(
            "Store already has {} questions, skipping demo seed",
            existing.questions
        );
        return Ok(0);
    }

    let payload: SeedPayload = serde_json::from_str(DEMO_SEED)
        .map_err(|e| AppError::Internal(format!("Bad demo seed JSON: {e}")))?;

    let now = Utc::now();
    let mut created = 0;
    for seed in payload.questions {
        let question = store
            .create_question(&NewQuestion {
                question_text: seed.question_text,
                pub_date: now + Duration::days(seed.pub_offset_days),
            })
            .await?;
        for choice in &seed.choices {
            store
                .create_choice(question.id, &choice.choice_text, choice.votes)
                .await?;
        }
        created += 1;
    }

    log::info!("Demo seed complete: created={created}");
    Ok(created)
}
