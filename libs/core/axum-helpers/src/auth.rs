//! Request authentication middleware.
//!
//! Accepts either a static API key (`X-API-Key` header) or HTTP basic auth.
//! The authenticated principal is attached to the request as an explicit
//! [`AuthContext`] extension; handlers that care about identity extract it,
//! nothing is stored in ambient state.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use core_config::{env_or_default, env_required, ConfigError, FromEnv};

use crate::errors::AppError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Credentials the boundary accepts.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub api_key: String,
    pub basic_username: String,
    pub basic_password: String,
}

impl AuthConfig {
    pub fn new(
        api_key: impl Into<String>,
        basic_username: impl Into<String>,
        basic_password: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            basic_username: basic_username.into(),
            basic_password: basic_password.into(),
        }
    }
}

impl FromEnv for AuthConfig {
    /// Requires `API_KEY`; `BASIC_AUTH_USERNAME` / `BASIC_AUTH_PASSWORD`
    /// default to admin/admin.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("API_KEY")?,
            basic_username: env_or_default("BASIC_AUTH_USERNAME", "admin"),
            basic_password: env_or_default("BASIC_AUTH_PASSWORD", "admin"),
        })
    }
}

/// How the request authenticated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    ApiKey,
    Basic,
}

/// The authenticated principal, inserted as a request extension.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub principal: String,
    pub scheme: AuthScheme,
}

/// Middleware that rejects requests without valid credentials.
///
/// Apply with `middleware::from_fn_with_state(auth_config, require_auth)`.
pub async fn require_auth(
    State(config): State<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&config, request.headers()) {
        Some(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        None => {
            tracing::info!("Rejected unauthenticated request to {}", request.uri().path());
            AppError::Unauthorized("Missing or invalid credentials".to_string()).into_response()
        }
    }
}

fn authenticate(config: &AuthConfig, headers: &HeaderMap) -> Option<AuthContext> {
    if let Some(key) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        if !config.api_key.is_empty() && key == config.api_key {
            return Some(AuthContext {
                principal: "api-key-user".to_string(),
                scheme: AuthScheme::ApiKey,
            });
        }
    }

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;
    let encoded = authorization.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (username, password) = credentials.split_once(':')?;

    if username == config.basic_username && password == config.basic_password {
        return Some(AuthContext {
            principal: username.to_string(),
            scheme: AuthScheme::Basic,
        });
    }

    None
}
