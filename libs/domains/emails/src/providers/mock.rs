//! Capturing mail provider for tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{MailProvider, ProviderError, ProviderResult, SendResult};
use crate::models::Email;

/// Mock provider that records sent emails instead of dispatching them.
#[derive(Debug)]
pub struct MockProvider {
    sent_emails: Arc<Mutex<Vec<Email>>>,
    failure: Option<String>,
}

impl MockProvider {
    /// Create a mock provider that accepts every send
    pub fn new() -> Self {
        Self {
            sent_emails: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Create a mock provider that fails every send with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent_emails: Arc::new(Mutex::new(Vec::new())),
            failure: Some(message.into()),
        }
    }

    /// All emails the provider accepted
    pub async fn sent_emails(&self) -> Vec<Email> {
        self.sent_emails.lock().await.clone()
    }

    /// Number of emails the provider accepted
    pub async fn sent_count(&self) -> usize {
        self.sent_emails.lock().await.len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailProvider for MockProvider {
    async fn send(&self, email: &Email) -> ProviderResult<SendResult> {
        if let Some(message) = &self.failure {
            return Err(ProviderError::Api {
                provider: "MOCK",
                detail: message.clone(),
            });
        }

        self.sent_emails.lock().await.push(email.clone());

        Ok(SendResult {
            external_id: format!("mock-{}", email.id),
        })
    }

    fn name(&self) -> &'static str {
        "MOCK"
    }
}
