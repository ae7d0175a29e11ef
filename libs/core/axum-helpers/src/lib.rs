//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the Axum services in this
//! workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: API-key / basic-auth middleware with an explicit request context
//! - **[`errors`]**: Structured error responses
//! - **[`health`]**: Health and readiness endpoint plumbing
//! - **[`server`]**: Router assembly, OpenAPI docs, graceful shutdown

pub mod auth;
pub mod errors;
pub mod health;
pub mod server;
pub mod shutdown;

// Re-export auth types
pub use auth::{require_auth, AuthConfig, AuthContext, AuthScheme};

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export health types
pub use health::{health_handler, run_health_checks, HealthCheckFuture, HealthResponse};

// Re-export server helpers
pub use server::{create_app, create_router};
pub use shutdown::shutdown_signal;
