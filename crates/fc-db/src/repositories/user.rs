use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::User;

pub async fn count_users<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(executor)
    .await
}

pub async fn create_user<'e, E>(
    executor: E,
    username: &str,
    email: &str,
    hashed_password: &str,
    is_admin: bool,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO users (username, email, hashed_password, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .bind(is_admin)
    .fetch_one(executor)
    .await
}

pub async fn find_by_username<'e, E>(
    executor: E,
    username: &str,
) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, username, email, is_active, is_admin, created_at
            FROM users
            WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}

pub async fn find_active_id_by_username<'e, E>(
    executor: E,
    username: &str,
) -> Result<Option<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id
            FROM users
            WHERE username = $1 AND is_active = true
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}
