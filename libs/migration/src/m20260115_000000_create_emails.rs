use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create email_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(EmailStatus::Enum)
                    .values([EmailStatus::Pending, EmailStatus::Sent, EmailStatus::Failed])
                    .to_owned(),
            )
            .await?;

        // Create emails table
        manager
            .create_table(
                Table::create()
                    .table(Emails::Table)
                    .if_not_exists()
                    .col(pk_uuid(Emails::Id))
                    .col(string(Emails::FromEmail))
                    .col(string(Emails::FromName))
                    .col(string(Emails::ToEmail))
                    .col(string(Emails::ToName))
                    .col(string(Emails::Subject))
                    .col(text_null(Emails::HtmlBody))
                    .col(text_null(Emails::TextBody))
                    .col(
                        ColumnDef::new(Emails::Status)
                            .enumeration(
                                EmailStatus::Enum,
                                [EmailStatus::Pending, EmailStatus::Sent, EmailStatus::Failed],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(string_null(Emails::ExternalId))
                    .col(text_null(Emails::ErrorMessage))
                    .col(
                        timestamp_with_time_zone(Emails::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Emails::SentAt))
                    .to_owned(),
            )
            .await?;

        // Create indexes for the status and recipient lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_emails_status")
                    .table(Emails::Table)
                    .col(Emails::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_emails_to_email")
                    .table(Emails::Table)
                    .col(Emails::ToEmail)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Emails::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(EmailStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Emails {
    Table,
    Id,
    FromEmail,
    FromName,
    ToEmail,
    ToName,
    Subject,
    HtmlBody,
    TextBody,
    Status,
    ExternalId,
    ErrorMessage,
    CreatedAt,
    SentAt,
}

#[derive(DeriveIden)]
enum EmailStatus {
    #[sea_orm(iden = "email_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "sent")]
    Sent,
    #[sea_orm(iden = "failed")]
    Failed,
}
