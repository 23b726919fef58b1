use fc_core::Deck;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::DeckSummary;

pub async fn create_deck<'e, E>(
    executor: E,
    user_id: Uuid,
    name: &str,
    description: Option<&str>,
    source_query: Option<&str>,
) -> Result<Deck, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO decks (user_id, name, description, source_query)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, description, is_public, source_query, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(description)
    .bind(source_query)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, deck_id: Uuid) -> Result<Option<Deck>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, name, description, is_public, source_query, created_at, updated_at
            FROM decks
            WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .fetch_optional(executor)
    .await
}

/// Newest decks first
pub async fn list_decks<'e, E>(
    executor: E,
    limit: i64,
    offset: i64,
) -> Result<Vec<DeckSummary>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                d.id,
                d.user_id,
                d.name,
                d.description,
                d.is_public,
                d.source_query,
                d.created_at,
                d.updated_at,
                COUNT(f.id) AS flashcard_count
            FROM decks d
            LEFT JOIN flashcards f ON f.deck_id = d.id
            GROUP BY d.id
            ORDER BY d.created_at DESC
            LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(executor)
    .await
}
