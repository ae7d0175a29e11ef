use crate::models::EmailStatus;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the emails table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "emails")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub from_email: String,
    pub from_name: String,
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub html_body: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub text_body: Option<String>,
    pub status: EmailStatus,
    pub external_id: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub sent_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Email
impl From<Model> for crate::models::Email {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            from_email: model.from_email,
            from_name: model.from_name,
            to_email: model.to_email,
            to_name: model.to_name,
            subject: model.subject,
            html_body: model.html_body,
            text_body: model.text_body,
            status: model.status,
            external_id: model.external_id,
            error_message: model.error_message,
            created_at: model.created_at.into(),
            sent_at: model.sent_at.map(Into::into),
        }
    }
}

// Conversion from a send request to the initial pending row.
// The identifier and creation timestamp are assigned here, exactly once.
impl From<crate::models::SendEmail> for ActiveModel {
    fn from(input: crate::models::SendEmail) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            from_email: Set(input.from_email),
            from_name: Set(input.from_name),
            to_email: Set(input.to_email),
            to_name: Set(input.to_name),
            subject: Set(input.subject),
            html_body: Set(input.html_body),
            text_body: Set(input.text_body),
            status: Set(EmailStatus::Pending),
            external_id: Set(None),
            error_message: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            sent_at: Set(None),
        }
    }
}

// Conversion from domain Email back to an ActiveModel for the terminal update
impl From<crate::models::Email> for ActiveModel {
    fn from(email: crate::models::Email) -> Self {
        ActiveModel {
            id: Set(email.id),
            from_email: Set(email.from_email),
            from_name: Set(email.from_name),
            to_email: Set(email.to_email),
            to_name: Set(email.to_name),
            subject: Set(email.subject),
            html_body: Set(email.html_body),
            text_body: Set(email.text_body),
            status: Set(email.status),
            external_id: Set(email.external_id),
            error_message: Set(email.error_message),
            created_at: Set(email.created_at.into()),
            sent_at: Set(email.sent_at.map(Into::into)),
        }
    }
}
