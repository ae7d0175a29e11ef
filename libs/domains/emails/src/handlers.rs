use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::EmailResult;
use crate::models::{Email, EmailFilter, EmailStatus, SendEmail};
use crate::repository::EmailRepository;
use crate::service::EmailService;

/// OpenAPI documentation for the emails API
#[derive(OpenApi)]
#[openapi(
    paths(send_email, get_email, list_emails),
    components(schemas(Email, SendEmail, EmailStatus)),
    tags(
        (name = "emails", description = "Transactional email dispatch and audit trail")
    )
)]
pub struct EmailApiDoc;

/// Create the router for the emails API
pub fn router<R: EmailRepository + 'static>(service: EmailService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_emails).post(send_email))
        .route("/{id}", get(get_email))
        .with_state(shared_service)
}

/// Send an email
///
/// Always answers 201 with the persisted record; a provider failure shows
/// up as status `failed` with `error_message` set, not as an error response.
#[utoipa::path(
    post,
    path = "",
    tag = "emails",
    request_body = SendEmail,
    responses(
        (status = 201, description = "Record created; inspect status for the delivery outcome", body = Email),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn send_email<R: EmailRepository>(
    State(service): State<Arc<EmailService<R>>>,
    Json(input): Json<SendEmail>,
) -> EmailResult<impl IntoResponse> {
    let email = service.send_email(input).await?;
    Ok((StatusCode::CREATED, Json(email)))
}

/// Get an email record by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "emails",
    params(
        ("id" = String, Path, description = "Email record ID")
    ),
    responses(
        (status = 200, description = "Email record found", body = Email),
        (status = 400, description = "Invalid email ID"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 404, description = "Email record not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_email<R: EmailRepository>(
    State(service): State<Arc<EmailService<R>>>,
    Path(id): Path<String>,
) -> EmailResult<impl IntoResponse> {
    let email_id = Uuid::parse_str(&id)
        .map_err(|_| crate::error::EmailError::Validation("Invalid email ID".to_string()))?;

    let email = service.get_email(email_id).await?;
    Ok(Json(email))
}

/// List email records with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "emails",
    params(EmailFilter),
    responses(
        (status = 200, description = "List of email records", body = Vec<Email>),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_emails<R: EmailRepository>(
    State(service): State<Arc<EmailService<R>>>,
    Query(filter): Query<EmailFilter>,
) -> EmailResult<Json<Vec<Email>>> {
    let emails = service.list_emails(filter).await?;
    Ok(Json(emails))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;
    use crate::repository::MockEmailRepository;
    use axum::body::Body;
    use axum::http::{header, Request};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn pending_from(input: SendEmail) -> Email {
        Email {
            id: Uuid::now_v7(),
            from_email: input.from_email,
            from_name: input.from_name,
            to_email: input.to_email,
            to_name: input.to_name,
            subject: input.subject,
            html_body: input.html_body,
            text_body: input.text_body,
            status: EmailStatus::Pending,
            external_id: None,
            error_message: None,
            created_at: Utc::now(),
            sent_at: None,
        }
    }

    fn app(repository: MockEmailRepository, provider: MockProvider) -> Router {
        router(EmailService::new(repository, Arc::new(provider)))
    }

    fn send_request(body: Value) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "from_email": "a@x.com",
            "from_name": "A",
            "to_email": "b@x.com",
            "to_name": "B",
            "subject": "Hi",
            "html_body": "<p>hi</p>"
        })
    }

    #[tokio::test]
    async fn test_send_email_returns_created_with_sent_record() {
        let mut repository = MockEmailRepository::new();
        repository
            .expect_create()
            .returning(|input| Ok(pending_from(input)));
        repository.expect_update().returning(|email| Ok(email));

        let response = app(repository, MockProvider::new())
            .oneshot(send_request(valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["status"], "sent");
        assert_eq!(body["from_email"], "a@x.com");
        assert!(body["external_id"].as_str().unwrap().starts_with("mock-"));
        assert!(body["sent_at"].is_string());
        assert!(body["error_message"].is_null());
    }

    #[tokio::test]
    async fn test_send_email_provider_failure_still_creates_record() {
        let mut repository = MockEmailRepository::new();
        repository
            .expect_create()
            .returning(|input| Ok(pending_from(input)));
        repository.expect_update().returning(|email| Ok(email));

        let response = app(repository, MockProvider::failing("mailbox on fire"))
            .oneshot(send_request(valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["status"], "failed");
        assert!(body["error_message"].as_str().unwrap().contains("mailbox on fire"));
        assert!(body["external_id"].is_null());
        assert!(body["sent_at"].is_null());
    }

    #[tokio::test]
    async fn test_send_email_invalid_address_is_bad_request() {
        // No repository expectations: the orchestrator must not be reached.
        let repository = MockEmailRepository::new();

        let mut body = valid_body();
        body["to_email"] = json!("not-an-address");

        let response = app(repository, MockProvider::new())
            .oneshot(send_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_send_email_missing_field_is_rejected() {
        let repository = MockEmailRepository::new();

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("subject");

        let response = app(repository, MockProvider::new())
            .oneshot(send_request(body))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_get_email_unknown_id_is_not_found() {
        let mut repository = MockEmailRepository::new();
        repository.expect_get_by_id().returning(|_| Ok(None));

        let response = app(repository, MockProvider::new())
            .oneshot(
                Request::get(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_email_invalid_id_is_bad_request() {
        let repository = MockEmailRepository::new();

        let response = app(repository, MockProvider::new())
            .oneshot(Request::get("/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_emails_passes_status_filter() {
        let mut repository = MockEmailRepository::new();
        repository
            .expect_list()
            .withf(|filter| filter.status == Some(EmailStatus::Failed))
            .returning(|_| Ok(vec![]));

        let response = app(repository, MockProvider::new())
            .oneshot(Request::get("/?status=failed").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_list_emails_passes_recipient_filter() {
        let mut repository = MockEmailRepository::new();
        repository
            .expect_list()
            .withf(|filter| filter.recipient.as_deref() == Some("b@x.com"))
            .returning(|_| Ok(vec![]));

        let response = app(repository, MockProvider::new())
            .oneshot(
                Request::get("/?recipient=b@x.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
