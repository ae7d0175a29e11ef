//! Brevo provider adapter.

use async_trait::async_trait;
use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{MailProvider, ProviderError, ProviderResult, SendResult};
use crate::models::Email;

const PROVIDER_NAME: &str = "BREVO";

/// Brevo API configuration
#[derive(Debug, Clone)]
pub struct BrevoConfig {
    /// Brevo API key
    pub api_key: String,
    /// API base URL (defaults to production)
    pub api_url: String,
}

impl BrevoConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: "https://api.brevo.com/v3".to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl FromEnv for BrevoConfig {
    /// Requires `BREVO_API_KEY`; `BREVO_API_URL` overrides the production endpoint.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("BREVO_API_KEY")?,
            api_url: env_or_default("BREVO_API_URL", "https://api.brevo.com/v3"),
        })
    }
}

/// Brevo provider
#[derive(Debug)]
pub struct BrevoProvider {
    config: BrevoConfig,
    client: Client,
}

impl BrevoProvider {
    pub fn new(config: BrevoConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

// Brevo API request/response structures

#[derive(Debug, Serialize)]
struct BrevoRequest {
    sender: BrevoContact,
    to: Vec<BrevoContact>,
    subject: String,
    #[serde(rename = "htmlContent", skip_serializing_if = "Option::is_none")]
    html_content: Option<String>,
    #[serde(rename = "textContent", skip_serializing_if = "Option::is_none")]
    text_content: Option<String>,
}

#[derive(Debug, Serialize)]
struct BrevoContact {
    email: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct BrevoResponse {
    #[serde(rename = "messageId")]
    message_id: Option<String>,
}

fn build_request(email: &Email) -> BrevoRequest {
    BrevoRequest {
        sender: BrevoContact {
            email: email.from_email.clone(),
            name: email.from_name.clone(),
        },
        to: vec![BrevoContact {
            email: email.to_email.clone(),
            name: email.to_name.clone(),
        }],
        subject: email.subject.clone(),
        html_content: email.html_body.clone().filter(|body| !body.is_empty()),
        text_content: email.text_body.clone().filter(|body| !body.is_empty()),
    }
}

#[async_trait]
impl MailProvider for BrevoProvider {
    async fn send(&self, email: &Email) -> ProviderResult<SendResult> {
        debug!(to = %email.to_email, "Sending email via Brevo");

        let request = build_request(email);

        let response = self
            .client
            .post(format!("{}/smtp/email", self.config.api_url))
            .header("api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(to = %email.to_email, %status, error = %error_body, "Brevo rejected the send");
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME,
                detail: format!("HTTP {}: {}", status, error_body),
            });
        }

        let body: BrevoResponse = response.json().await?;
        match body.message_id {
            Some(message_id) => {
                info!(to = %email.to_email, %message_id, "Email sent via Brevo");
                Ok(SendResult {
                    external_id: message_id,
                })
            }
            // The message id is authoritative for Brevo; a success body
            // without one is unusable.
            None => Err(ProviderError::Api {
                provider: PROVIDER_NAME,
                detail: "No message ID received from Brevo".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmailStatus;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_email() -> Email {
        Email {
            id: Uuid::now_v7(),
            from_email: "a@x.com".to_string(),
            from_name: "A".to_string(),
            to_email: "b@x.com".to_string(),
            to_name: "B".to_string(),
            subject: "Hi".to_string(),
            html_body: Some("<p>hi</p>".to_string()),
            text_body: None,
            status: EmailStatus::Pending,
            external_id: None,
            error_message: None,
            created_at: chrono::Utc::now(),
            sent_at: None,
        }
    }

    fn provider_for(server: &MockServer) -> BrevoProvider {
        BrevoProvider::new(BrevoConfig::new("test-key").with_api_url(server.uri()))
    }

    #[tokio::test]
    async fn test_send_returns_message_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/smtp/email"))
            .and(header("api-key", "test-key"))
            .and(body_partial_json(json!({
                "sender": {"email": "a@x.com", "name": "A"},
                "to": [{"email": "b@x.com", "name": "B"}],
                "subject": "Hi",
                "htmlContent": "<p>hi</p>"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"messageId": "msg-123"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server).send(&test_email()).await.unwrap();
        assert_eq!(result.external_id, "msg-123");
    }

    #[tokio::test]
    async fn test_success_without_message_id_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/smtp/email"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider_for(&server).send(&test_email()).await.unwrap_err();
        assert!(err.to_string().contains("No message ID"));
    }

    #[tokio::test]
    async fn test_error_response_carries_vendor_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/smtp/email"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"code": "invalid_parameter", "message": "sender not allowed"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = provider_for(&server).send(&test_email()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("BREVO"));
        assert!(message.contains("400"));
        assert!(message.contains("sender not allowed"));
    }

    #[tokio::test]
    async fn test_missing_body_content_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/smtp/email"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"messageId": "m2"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut email = test_email();
        email.html_body = None;
        email.text_body = None;

        let result = provider_for(&server).send(&email).await.unwrap();
        assert_eq!(result.external_id, "m2");
    }
}
