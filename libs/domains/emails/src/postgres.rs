use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::EmailResult,
    models::{Email, EmailFilter, SendEmail},
    repository::EmailRepository,
};

pub struct PgEmailRepository {
    db: DatabaseConnection,
}

impl PgEmailRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmailRepository for PgEmailRepository {
    async fn create(&self, input: SendEmail) -> EmailResult<Email> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await?;

        tracing::debug!(email_id = %model.id, "Created email record");
        Ok(model.into())
    }

    async fn update(&self, email: Email) -> EmailResult<Email> {
        let active_model: entity::ActiveModel = email.into();

        let model = active_model.update(&self.db).await?;

        tracing::debug!(email_id = %model.id, status = %model.status, "Updated email record");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> EmailResult<Option<Email>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: EmailFilter) -> EmailResult<Vec<Email>> {
        let mut query = entity::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        if let Some(recipient) = filter.recipient {
            query = query.filter(entity::Column::ToEmail.eq(recipient));
        }

        // Natural persistence order
        let models = query
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmailStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn stored_model(status: EmailStatus) -> entity::Model {
        entity::Model {
            id: Uuid::now_v7(),
            from_email: "a@x.com".to_string(),
            from_name: "A".to_string(),
            to_email: "b@x.com".to_string(),
            to_name: "B".to_string(),
            subject: "Hi".to_string(),
            html_body: Some("<p>hi</p>".to_string()),
            text_body: None,
            status,
            external_id: None,
            error_message: None,
            created_at: chrono::Utc::now().into(),
            sent_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_returns_pending_record() {
        let stored = stored_model(EmailStatus::Pending);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .into_connection();

        let repository = PgEmailRepository::new(db);
        let input = SendEmail {
            from_email: "a@x.com".to_string(),
            from_name: "A".to_string(),
            to_email: "b@x.com".to_string(),
            to_name: "B".to_string(),
            subject: "Hi".to_string(),
            html_body: Some("<p>hi</p>".to_string()),
            text_body: None,
        };

        let email = repository.create(input).await.unwrap();
        assert_eq!(email.id, stored.id);
        assert_eq!(email.status, EmailStatus::Pending);
        assert!(email.external_id.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_maps_missing_to_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let repository = PgEmailRepository::new(db);
        let found = repository.get_by_id(Uuid::now_v7()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_maps_models_to_domain() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                stored_model(EmailStatus::Sent),
                stored_model(EmailStatus::Failed),
            ]])
            .into_connection();

        let repository = PgEmailRepository::new(db);
        let emails = repository.list(EmailFilter::default()).await.unwrap();
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].status, EmailStatus::Sent);
        assert_eq!(emails[1].status, EmailStatus::Failed);
    }
}
