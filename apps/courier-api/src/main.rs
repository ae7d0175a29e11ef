use axum_helpers::server::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use domain_emails::providers;
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables; any missing required
    // key aborts startup here, never at request time
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Bind exactly one mail provider for the process lifetime
    let provider = providers::select_provider_from_env()?;
    info!("Mail provider bound: {}", provider.name());

    let db = postgres::connect_from_config_with_retry(config.database.clone(), None).await?;
    postgres::run_migrations::<Migrator>(&db, "courier").await?;

    let state = AppState {
        config: config.clone(),
        db,
        provider,
    };

    let router = create_router::<domain_emails::EmailApiDoc>(api::routes(&state))
        .merge(api::ready_router(state));

    create_app(router, &config.server).await?;

    Ok(())
}
