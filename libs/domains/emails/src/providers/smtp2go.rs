//! SMTP2GO provider adapter.

use async_trait::async_trait;
use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{MailProvider, ProviderError, ProviderResult, SendResult};
use crate::models::Email;

const PROVIDER_NAME: &str = "SMTP2GO";

/// SMTP2GO API configuration
#[derive(Debug, Clone)]
pub struct Smtp2GoConfig {
    /// SMTP2GO API key
    pub api_key: String,
    /// API base URL (defaults to production)
    pub api_url: String,
}

impl Smtp2GoConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: "https://api.smtp2go.com/v3".to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl FromEnv for Smtp2GoConfig {
    /// Requires `SMTP2GO_API_KEY`; `SMTP2GO_API_URL` overrides the production endpoint.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("SMTP2GO_API_KEY")?,
            api_url: env_or_default("SMTP2GO_API_URL", "https://api.smtp2go.com/v3"),
        })
    }
}

/// SMTP2GO provider
#[derive(Debug)]
pub struct Smtp2GoProvider {
    config: Smtp2GoConfig,
    client: Client,
}

impl Smtp2GoProvider {
    pub fn new(config: Smtp2GoConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

// SMTP2GO API request/response structures

#[derive(Debug, Serialize)]
struct Smtp2GoRequest {
    sender: String,
    to: Vec<String>,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Smtp2GoResponse {
    request_id: Option<String>,
    data: Option<Smtp2GoData>,
}

#[derive(Debug, Deserialize)]
struct Smtp2GoData {
    succeeded: Option<bool>,
    message_id: Option<String>,
}

/// SMTP2GO takes addresses as a single "Display Name <address>" string.
fn format_mailbox(name: &str, email: &str) -> String {
    if name.is_empty() {
        email.to_string()
    } else {
        format!("{} <{}>", name, email)
    }
}

fn build_request(email: &Email) -> Smtp2GoRequest {
    Smtp2GoRequest {
        sender: format_mailbox(&email.from_name, &email.from_email),
        to: vec![format_mailbox(&email.to_name, &email.to_email)],
        subject: email.subject.clone(),
        html_body: email.html_body.clone().filter(|body| !body.is_empty()),
        text_body: email.text_body.clone().filter(|body| !body.is_empty()),
    }
}

#[async_trait]
impl MailProvider for Smtp2GoProvider {
    async fn send(&self, email: &Email) -> ProviderResult<SendResult> {
        // SMTP2GO rejects empty messages; fail before making the call.
        if !email.has_html() && !email.has_text() {
            return Err(ProviderError::MissingContent(
                "Email must have either HTML or text content".to_string(),
            ));
        }

        debug!(to = %email.to_email, "Sending email via SMTP2GO");

        let request = build_request(email);

        let response = self
            .client
            .post(format!("{}/email/send", self.config.api_url))
            .header("X-Smtp2go-Api-Key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(to = %email.to_email, %status, error = %error_body, "SMTP2GO rejected the send");
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME,
                detail: format!("HTTP {}: {}", status, error_body),
            });
        }

        let body: Smtp2GoResponse = response.json().await?;

        let succeeded = body
            .data
            .as_ref()
            .and_then(|data| data.succeeded)
            .unwrap_or(false);
        if !succeeded {
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME,
                detail: "send failed or no success status returned".to_string(),
            });
        }

        // Id precedence: explicit message id, then request id, then a
        // sentinel. A successful send without an id is still a success.
        let external_id = body
            .data
            .and_then(|data| data.message_id)
            .or(body.request_id)
            .unwrap_or_else(|| "UNKNOWN".to_string());

        info!(to = %email.to_email, message_id = %external_id, "Email sent via SMTP2GO");
        Ok(SendResult { external_id })
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
