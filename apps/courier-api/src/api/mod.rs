use axum::{middleware, Router};

pub mod emails;
pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Every route in here sits behind the credential check; the health
/// endpoints are mounted separately and stay open.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/emails", emails::router(state))
        .layer(middleware::from_fn_with_state(
            state.config.auth.clone(),
            axum_helpers::auth::require_auth,
        ))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
