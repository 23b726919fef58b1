pub mod models;
pub mod repositories;
pub mod schema;
pub mod seed;

use anyhow::Context;
use sqlx::{PgPool, Postgres, migrate::MigrateDatabase, postgres::PgPoolOptions};

pub use bcrypt::DEFAULT_COST as DEFAULT_BCRYPT_COST;
pub use seed::{AdminSeed, SeedOutcome};

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Create the database named in `database_url` if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> anyhow::Result<()> {
    let exists = Postgres::database_exists(database_url).await?;
    if !exists {
        tracing::info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
    }

    Ok(())
}

/// Apply the schema. Safe to run repeatedly.
pub async fn apply_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::raw_sql(&schema::full_schema())
        .execute(pool)
        .await
        .context("failed to apply database schema")?;

    Ok(())
}

/// Bring a database to a usable state: schema, indexes and the seed admin.
pub async fn bootstrap(
    pool: &PgPool,
    seed: &AdminSeed,
    bcrypt_cost: u32,
) -> anyhow::Result<SeedOutcome> {
    apply_schema(pool).await?;
    tracing::info!("Database schema is up to date");

    seed::seed_admin_if_empty(pool, seed, bcrypt_cost).await
}
