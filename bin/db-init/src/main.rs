//! Create the database, apply the schema and seed the admin account.
//!
//! Safe to run repeatedly: the schema is idempotent and the admin is only
//! inserted while the users table is empty.

use anyhow::Context;
use fc_db::{AdminSeed, SeedOutcome};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
struct DbInitConfig {
    database_url: String,
    #[serde(default = "default_bcrypt_cost")]
    bcrypt_cost: u32,
}

const fn default_bcrypt_cost() -> u32 {
    fc_db::DEFAULT_BCRYPT_COST
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sqlx=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config: DbInitConfig = envy::from_env().context("DATABASE_URL must be set")?;
    let seed: AdminSeed = envy::from_env().context("invalid admin seed configuration")?;

    fc_db::ensure_database_exists(&config.database_url).await?;
    let pool = fc_db::create_pool(&config.database_url, 1).await?;

    match fc_db::bootstrap(&pool, &seed, config.bcrypt_cost).await? {
        SeedOutcome::Created { user_id } => {
            tracing::info!(%user_id, username = %seed.username, "Admin account created");
        }
        SeedOutcome::Skipped { existing_users } => {
            tracing::info!(existing_users, "Users already exist, admin seed skipped");
        }
    }

    pool.close().await;
    Ok(())
}
