use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EmailResult<T> = Result<T, EmailError>;

/// Convert EmailError to AppError for standardized error responses
impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::NotFound(id) => AppError::NotFound(format!("Email {} not found", id)),
            EmailError::Validation(msg) => AppError::BadRequest(msg),
            EmailError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
            EmailError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EmailError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for EmailError {
    fn from(err: sea_orm::DbErr) -> Self {
        EmailError::Database(err.to_string())
    }
}
