//! Emails Domain
//!
//! The send pipeline: a generic email record, a provider capability with one
//! adapter per vendor, and the service that drives the
//! pending → sent | failed state machine around a single remote call.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← state machine: persist pending, dispatch, persist outcome
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼──────┐│┌──────────┐
//! │Repository│││ Provider │  ← one adapter per vendor (Brevo, SMTP2GO)
//! └──┬──────┘│└──────────┘
//!    │       │
//! ┌──▼───────▼──┐
//! │   Models    │  ← entity, DTOs, status enum
//! └─────────────┘
//! ```
//!
//! The provider never touches persistence and the service never touches
//! vendor wire formats; swapping vendors is a configuration change.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_emails::{providers, EmailService, MailProviderKind, PgEmailRepository};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let provider = providers::select_provider(MailProviderKind::Brevo)?;
//! let repository = PgEmailRepository::new(db);
//! let service = EmailService::new(repository, provider);
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod providers;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EmailError, EmailResult};
pub use handlers::EmailApiDoc;
pub use models::{Email, EmailFilter, EmailStatus, SendEmail};
pub use postgres::PgEmailRepository;
pub use providers::{MailProvider, MailProviderKind, ProviderError, SendResult};
pub use repository::EmailRepository;
pub use service::EmailService;
