use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Delivery lifecycle of an email record.
///
/// `pending` is written before the provider call; exactly one terminal
/// state is written after it. There are no other transitions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "email_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EmailStatus {
    /// Persisted, provider call not yet resolved
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Provider accepted the message
    #[sea_orm(string_value = "sent")]
    Sent,
    /// Provider rejected the message or was unreachable
    #[sea_orm(string_value = "failed")]
    Failed,
}

impl EmailStatus {
    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EmailStatus::Pending)
    }
}

/// Email record - one send attempt and its audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Email {
    /// Unique identifier, assigned when the pending record is created
    pub id: Uuid,
    /// Sender address
    pub from_email: String,
    /// Sender display name
    pub from_name: String,
    /// Recipient address
    pub to_email: String,
    /// Recipient display name
    pub to_name: String,
    /// Subject line
    pub subject: String,
    /// HTML body, if any
    pub html_body: Option<String>,
    /// Plain-text body, if any
    pub text_body: Option<String>,
    /// Delivery lifecycle state
    pub status: EmailStatus,
    /// Provider-assigned message id, set only on success
    pub external_id: Option<String>,
    /// Provider failure detail, set only on failure
    pub error_message: Option<String>,
    /// First-persistence timestamp, never overwritten
    pub created_at: DateTime<Utc>,
    /// Dispatch timestamp, set only on success
    pub sent_at: Option<DateTime<Utc>>,
}

impl Email {
    pub fn has_html(&self) -> bool {
        self.html_body.as_deref().is_some_and(|body| !body.is_empty())
    }

    pub fn has_text(&self) -> bool {
        self.text_body.as_deref().is_some_and(|body| !body.is_empty())
    }

    /// Transition to the success terminal state.
    pub fn mark_sent(&mut self, external_id: String, at: DateTime<Utc>) {
        self.status = EmailStatus::Sent;
        self.external_id = Some(external_id);
        self.sent_at = Some(at);
    }

    /// Transition to the failure terminal state.
    pub fn mark_failed(&mut self, error: String) {
        self.status = EmailStatus::Failed;
        self.error_message = Some(error);
    }
}

/// DTO for a send request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendEmail {
    #[validate(email)]
    pub from_email: String,
    #[validate(length(min = 1, max = 255))]
    pub from_name: String,
    #[validate(email)]
    pub to_email: String,
    #[validate(length(min = 1, max = 255))]
    pub to_name: String,
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    pub html_body: Option<String>,
    pub text_body: Option<String>,
}

/// Query filters for listing email records
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EmailFilter {
    /// Filter by lifecycle status
    pub status: Option<EmailStatus>,
    /// Filter by recipient address (exact match)
    pub recipient: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_email() -> Email {
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
            created_at: Utc::now(),
            sent_at: None,
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EmailStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&EmailStatus::Sent).unwrap(), "\"sent\"");
        assert_eq!(serde_json::to_string(&EmailStatus::Failed).unwrap(), "\"failed\"");
    }

    #[test]
    fn test_status_parses_case_insensitive() {
        assert_eq!("SENT".parse::<EmailStatus>().unwrap(), EmailStatus::Sent);
        assert_eq!("failed".parse::<EmailStatus>().unwrap(), EmailStatus::Failed);
        assert!("lost".parse::<EmailStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!EmailStatus::Pending.is_terminal());
        assert!(EmailStatus::Sent.is_terminal());
        assert!(EmailStatus::Failed.is_terminal());
    }

    #[test]
    fn test_mark_sent_sets_id_and_timestamp() {
        let mut email = pending_email();
        let at = Utc::now();
        email.mark_sent("msg-1".to_string(), at);

        assert_eq!(email.status, EmailStatus::Sent);
        assert_eq!(email.external_id.as_deref(), Some("msg-1"));
        assert_eq!(email.sent_at, Some(at));
        assert!(email.error_message.is_none());
    }

    #[test]
    fn test_mark_failed_keeps_sent_at_unset() {
        let mut email = pending_email();
        email.mark_failed("vendor exploded".to_string());

        assert_eq!(email.status, EmailStatus::Failed);
        assert_eq!(email.error_message.as_deref(), Some("vendor exploded"));
        assert!(email.external_id.is_none());
        assert!(email.sent_at.is_none());
    }

    #[test]
    fn test_body_presence_ignores_empty_strings() {
        let mut email = pending_email();
        assert!(email.has_html());
        assert!(!email.has_text());

        email.html_body = Some(String::new());
        email.text_body = Some("plain".to_string());
        assert!(!email.has_html());
        assert!(email.has_text());
    }
}
