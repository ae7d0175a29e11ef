use axum_helpers::auth::AuthConfig;
use core_config::{server::ServerConfig, ConfigError, FromEnv};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration
///
/// Composes shared config components from the workspace libraries. Each
/// piece fails loading when a required environment variable is absent.
#[derive(Clone, Debug)]
pub struct Config {
    pub auth: AuthConfig,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if DATABASE_URL not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let auth = AuthConfig::from_env()?; // Required - will fail if API_KEY not set

        Ok(Self {
            auth,
            database,
            server,
            environment,
        })
    }
}
