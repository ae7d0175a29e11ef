//! Application state management.
//!
//! The shared state passed to all request handlers: configuration, the
//! database connection pool, and the one mail provider bound at startup.

use domain_emails::MailProvider;
use std::sync::Arc;

/// Shared application state.
///
/// Cloned per handler; everything inside is an inexpensive handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// The mail provider selected at startup; the rest of the system only
    /// ever sees this capability, never a concrete vendor
    pub provider: Arc<dyn MailProvider>,
}
