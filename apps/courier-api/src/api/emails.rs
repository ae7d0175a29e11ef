use axum::Router;
use domain_emails::{handlers, EmailService, PgEmailRepository};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgEmailRepository::new(state.db.clone());
    let service = EmailService::new(repository, state.provider.clone());
    handlers::router(service)
}
