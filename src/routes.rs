use actix_web::{HttpResponse, web};

use crate::errors::not_found_page;
use crate::handlers::{diagnostic_handlers, poll_handlers};
use crate::models::poll::PollStore;

/// Register every route for a given store backend. The caller supplies the
/// store as `web::Data<S>` and the config as `web::Data<AppConfig>`.
pub fn configure<S: PollStore>(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Diagnostics
        .route("/sleep", web::get().to(diagnostic_handlers::sleep_default::<S>))
        .route("/sleep/{seconds:\\d+}", web::get().to(diagnostic_handlers::sleep::<S>))
        .route("/error", web::get().to(diagnostic_handlers::error))
        // Polls
        .route("/", web::get().to(poll_handlers::index::<S>))
        .route("/{id:\\d+}/", web::get().to(poll_handlers::detail::<S>))
        .route("/{id:\\d+}/results/", web::get().to(poll_handlers::results::<S>))
        .route("/{id:\\d+}/vote/", web::post().to(poll_handlers::vote::<S>))
        // Default 404 handler
        .default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    not_found_page()
}
