//! Mail provider adapters.
//!
//! Each adapter translates a generic [`Email`] into one vendor's wire format,
//! issues a single HTTP call, and normalizes the vendor response into a
//! [`SendResult`] or a [`ProviderError`]. Adapters never touch persistence;
//! the service owns the record lifecycle.

mod brevo;
pub mod mock;
mod smtp2go;

pub use brevo::{BrevoConfig, BrevoProvider};
pub use mock::MockProvider;
pub use smtp2go::{Smtp2GoConfig, Smtp2GoProvider};

use std::sync::Arc;

use async_trait::async_trait;
use core_config::{env_required, ConfigError, FromEnv};
use strum::{Display, EnumString};

use crate::models::Email;

/// Outcome of a successful dispatch
#[derive(Debug, Clone)]
pub struct SendResult {
    /// Vendor-assigned message id
    pub external_id: String,
}

/// Failure raised by a provider adapter
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Provider-specific precondition failed; no request was made
    #[error("{0}")]
    MissingContent(String),

    /// The vendor rejected the send or returned an unusable response
    #[error("{provider} API error: {detail}")]
    Api {
        provider: &'static str,
        detail: String,
    },

    /// Transport-level failure talking to the vendor
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Capability for dispatching email through one vendor.
///
/// Exactly one implementation is bound per process; the rest of the system
/// is written against this trait.
#[async_trait]
pub trait MailProvider: std::fmt::Debug + Send + Sync {
    /// Send an email using the vendor's API, returning the assigned id.
    ///
    /// Makes at most one outbound call; precondition failures make none.
    async fn send(&self, email: &Email) -> ProviderResult<SendResult>;

    /// Stable provider name, used for logging only.
    fn name(&self) -> &'static str;
}

/// Vendors this service can dispatch through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MailProviderKind {
    Brevo,
    Smtp2Go,
}

/// Bind the provider named by `MAIL_PROVIDER`.
///
/// Called once at startup. An unknown vendor name or a missing credential is
/// a configuration-time fatal error, never a per-request one.
pub fn select_provider_from_env() -> Result<Arc<dyn MailProvider>, ConfigError> {
    let name = env_required("MAIL_PROVIDER")?;
    let kind = name
        .parse::<MailProviderKind>()
        .map_err(|_| ConfigError::InvalidValue {
            key: "MAIL_PROVIDER".to_string(),
            details: format!(
                "unknown mail provider '{}', expected one of: brevo, smtp2go",
                name
            ),
        })?;

    select_provider(kind)
}

/// Bind one provider from its environment configuration.
pub fn select_provider(kind: MailProviderKind) -> Result<Arc<dyn MailProvider>, ConfigError> {
    match kind {
        MailProviderKind::Brevo => Ok(Arc::new(BrevoProvider::new(BrevoConfig::from_env()?))),
        MailProviderKind::Smtp2Go => {
            Ok(Arc::new(Smtp2GoProvider::new(Smtp2GoConfig::from_env()?)))
        }
    }
}
