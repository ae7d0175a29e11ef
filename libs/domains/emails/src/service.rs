use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EmailError, EmailResult};
use crate::models::{Email, EmailFilter, SendEmail};
use crate::providers::MailProvider;
use crate::repository::EmailRepository;

/// Service layer driving the send pipeline and lookups.
///
/// The service is the sole writer of an email's status: it persists the
/// pending record before the provider call and exactly one terminal record
/// immediately after, all within the handling of a single request. Nothing
/// transitions out of `sent` or `failed`.
#[derive(Clone)]
pub struct EmailService<R: EmailRepository> {
    repository: Arc<R>,
    provider: Arc<dyn MailProvider>,
}

impl<R: EmailRepository> EmailService<R> {
    pub fn new(repository: R, provider: Arc<dyn MailProvider>) -> Self {
        Self {
            repository: Arc::new(repository),
            provider,
        }
    }

    /// Dispatch an email through the bound provider and record the outcome.
    ///
    /// Provider failures are absorbed into the returned record (status
    /// `failed`, `error_message` set) rather than raised; callers inspect
    /// the record to learn the outcome. Only validation and persistence
    /// problems surface as errors.
    #[instrument(skip(self, input), fields(to = %input.to_email, provider = self.provider.name()))]
    pub async fn send_email(&self, input: SendEmail) -> EmailResult<Email> {
        input
            .validate()
            .map_err(|e| EmailError::Validation(e.to_string()))?;

        // The pending record is durable before the remote call; it exists
        // even if the provider call never resolves.
        let mut email = self.repository.create(input).await?;

        match self.provider.send(&email).await {
            Ok(result) => {
                email.mark_sent(result.external_id, Utc::now());
                tracing::info!(
                    email_id = %email.id,
                    external_id = ?email.external_id,
                    "Email sent successfully"
                );
            }
            Err(e) => {
                email.mark_failed(e.to_string());
                tracing::error!(email_id = %email.id, error = %e, "Failed to send email");
            }
        }

        self.repository.update(email).await
    }

    /// Get an email record by ID
    #[instrument(skip(self), fields(email_id = %id))]
    pub async fn get_email(&self, id: Uuid) -> EmailResult<Email> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EmailError::NotFound(id))
    }

    /// List email records.
    ///
    /// The status filter takes precedence over the recipient filter when
    /// both are supplied.
    pub async fn list_emails(&self, mut filter: EmailFilter) -> EmailResult<Vec<Email>> {
        if filter.status.is_some() {
            filter.recipient = None;
        }

        self.repository.list(filter).await
    }
}
