use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EmailResult;
use crate::models::{Email, EmailFilter, SendEmail};

/// Repository trait for email record persistence
///
/// The service treats every write as atomic and durable once it returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// Persist the initial pending record, assigning its identifier
    async fn create(&self, input: SendEmail) -> EmailResult<Email>;

    /// Persist the terminal state of an existing record
    async fn update(&self, email: Email) -> EmailResult<Email>;

    /// Get an email record by ID
    async fn get_by_id(&self, id: Uuid) -> EmailResult<Option<Email>>;

    /// List email records with optional filters
    async fn list(&self, filter: EmailFilter) -> EmailResult<Vec<Email>>;
}
