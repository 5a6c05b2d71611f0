use actix_web::{App, HttpServer, middleware, web};
use std::io;

use polls::config::AppConfig;
use polls::db;
use polls::models::poll::{MemoryPollStore, PgPollStore, PollStore};
use polls::routes;

fn startup_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();

    match config.database_url.clone() {
        Some(url) => {
            let pool = db::init_pool(&url, config.db_max_connections)
                .await
                .map_err(startup_error)?;
            db::run_migrations(&pool).await.map_err(startup_error)?;
            log::info!("Using Postgres store (max {} connections)", config.db_max_connections);
            serve(PgPollStore::new(pool), config).await
        }
        None => {
            log::warn!("No DATABASE_URL set, using in-memory store (votes lost on restart)");
            serve(MemoryPollStore::new(), config).await
        }
    }
}

async fn serve<S: PollStore>(store: S, config: AppConfig) -> io::Result<()> {
    if config.seed_demo_data {
        db::seed_demo_data(&store).await.map_err(startup_error)?;
    }

    let bind_addr = config.bind_addr.clone();
    let workers = config.http_workers;
    let store = web::Data::new(store);
    let config = web::Data::new(config);

    log::info!("Starting server at http://{bind_addr}");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(config.clone())
            .configure(routes::configure::<S>)
    });
    if let Some(n) = workers {
        server = server.workers(n);
    }

    server.bind(bind_addr)?.run().await
}
