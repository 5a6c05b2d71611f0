//! Shared test infrastructure.
//!
//! - `poll_fixture()` - memory store with one published and one future question
//! - `setup_test_db()` - isolated Postgres schema, only when `TEST_DATABASE_URL` is set

#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::atomic::{AtomicUsize, Ordering};

use polls::config::AppConfig;
use polls::db::MIGRATOR;
use polls::models::poll::{Choice, MemoryPollStore, NewQuestion, PollStore, Question};

// ============================================================================
// FIXTURES
// ============================================================================

/// Config for handler tests: short sleep bound, no seeding.
pub fn test_config() -> AppConfig {
    AppConfig {
        max_sleep_secs: 3,
        seed_demo_data: false,
        ..AppConfig::default()
    }
}

/// Create a question published `offset_days` from now (negative is past).
pub async fn create_question<S: PollStore>(store: &S, text: &str, offset_days: i64) -> Question {
    store
        .create_question(&NewQuestion {
            question_text: text.to_string(),
            pub_date: Utc::now() + Duration::days(offset_days),
        })
        .await
        .expect("create question")
}

pub async fn create_choice<S: PollStore>(store: &S, question: &Question, text: &str, votes: i32) -> Choice {
    store
        .create_choice(question.id, text, votes)
        .await
        .expect("create choice")
}

/// Published and future questions with their choices.
pub struct PollFixture {
    pub store: MemoryPollStore,
    pub published: Question,
    pub c1: Choice,
    pub c2: Choice,
    pub future: Question,
    pub future_choice: Choice,
}

/// A published question ("yesterday") with choices at 0 and 3 votes, plus a
/// question dated 30 days ahead with a single choice.
pub async fn poll_fixture() -> PollFixture {
    let store = MemoryPollStore::new();
    let published = create_question(&store, "What's up?", -1).await;
    let c1 = create_choice(&store, &published, "Not much", 0).await;
    let c2 = create_choice(&store, &published, "The sky", 3).await;
    let future = create_question(&store, "Future question", 30).await;
    let future_choice = create_choice(&store, &future, "Later", 0).await;
    PollFixture { store, published, c1, c2, future, future_choice }
}

/// Current votes for a question's choices, by choice id order.
pub async fn votes_of<S: PollStore>(store: &S, question_id: i64) -> Vec<i32> {
    store
        .choices_for(question_id)
        .await
        .expect("choices")
        .iter()
        .map(|c| c.votes)
        .collect()
}

// ============================================================================
// DATABASE SETUP
// ============================================================================

static SCHEMA_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A pool whose connections see only a freshly migrated private schema.
pub struct TestDb {
    pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drop the private schema. Call at the end of the test.
    pub async fn teardown(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop test schema");
        self.admin.close().await;
    }
}

/// Set up an isolated Postgres schema with migrations applied.
///
/// Returns `None` when `TEST_DATABASE_URL` is not set, so database tests
/// are skipped on machines without Postgres.
pub async fn setup_test_db() -> Option<TestDb> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set, skipping Postgres test");
            return None;
        }
    };

    let schema = format!(
        "polls_test_{}_{}",
        std::process::id(),
        SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst)
    );

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE"))
        .execute(&admin)
        .await
        .expect("drop stale schema");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("create test schema");

    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let search_path = search_path.clone();
            Box::pin(async move {
                sqlx::query(&search_path).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("connect test pool");

    MIGRATOR.run(&pool).await.expect("run migrations");

    Some(TestDb { pool, admin, schema })
}
