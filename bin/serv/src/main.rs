use std::net::SocketAddr;

use anyhow::Context;
use fc_api::{ApiConfig, ApiState};
use fc_db::AdminSeed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("invalid configuration")?;

    fc_api::tracing::init_tracing(&config.env);
    let metrics_handle = fc_api::metrics::init_metrics()?;

    if config.bootstrap_on_start {
        fc_db::ensure_database_exists(&config.database_url).await?;
    }

    let pool = fc_db::create_pool(&config.database_url, config.max_db_connections).await?;

    if config.bootstrap_on_start {
        let seed: AdminSeed = envy::from_env().context("invalid admin seed configuration")?;
        let outcome = fc_db::bootstrap(&pool, &seed, fc_db::DEFAULT_BCRYPT_COST).await?;
        tracing::info!(?outcome, "Database bootstrapped");
    }

    let state = ApiState::new(&config, pool);
    let app = fc_api::router::app(state, &config, Some(metrics_handle));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        env = ?config.env,
        "Flashcards API listening"
    );

    // Connect info is the rate limiter's fallback when no proxy headers are present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
