//! Weighted text search over decks and flashcards.
//!
//! Terms are OR-ed together so any word of the query can match, and rows are
//! ordered by `ts_rank` with primary fields (deck name, question) weighted
//! twice as much as secondary ones. A case-insensitive substring match on the
//! primary field also counts as a hit so partial words still find something.

use std::sync::LazyLock;

use fc_core::{Deck, StoredFlashcard};
use sqlx::{Executor, Postgres};

use crate::schema::{DECK_DOCUMENT, FLASHCARD_DOCUMENT, RANK_WEIGHTS};

/// `plainto_tsquery` joins terms with `&`; rewrite to `|` for any-term matching
const ANY_TERM_QUERY: &str =
    "replace(plainto_tsquery('english', $1)::TEXT, ' & ', ' | ')::tsquery";

static DECK_SEARCH: LazyLock<String> = LazyLock::new(|| {
    format!(
        r#"
            SELECT d.id, d.user_id, d.name, d.description, d.is_public, d.source_query,
                   d.created_at, d.updated_at
            FROM decks d
            WHERE {DECK_DOCUMENT} @@ {ANY_TERM_QUERY}
               OR position(lower($1) IN lower(d.name)) > 0
            ORDER BY ts_rank('{RANK_WEIGHTS}', {DECK_DOCUMENT}, {ANY_TERM_QUERY}) DESC,
                     d.created_at DESC
            LIMIT $2
        "#
    )
});

static FLASHCARD_SEARCH: LazyLock<String> = LazyLock::new(|| {
    format!(
        r#"
            SELECT f.id, f.deck_id, f.user_id, f.question, f.answer, f.created_at, f.updated_at
            FROM flashcards f
            WHERE {FLASHCARD_DOCUMENT} @@ {ANY_TERM_QUERY}
               OR position(lower($1) IN lower(f.question)) > 0
            ORDER BY ts_rank('{RANK_WEIGHTS}', {FLASHCARD_DOCUMENT}, {ANY_TERM_QUERY}) DESC,
                     f.created_at DESC
            LIMIT $2
        "#
    )
});

pub async fn search_decks<'e, E>(
    executor: E,
    query: &str,
    limit: i64,
) -> Result<Vec<Deck>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(DECK_SEARCH.as_str())
        .bind(query)
        .bind(limit)
        .fetch_all(executor)
        .await
}

pub async fn search_flashcards<'e, E>(
    executor: E,
    query: &str,
    limit: i64,
) -> Result<Vec<StoredFlashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(FLASHCARD_SEARCH.as_str())
        .bind(query)
        .bind(limit)
        .fetch_all(executor)
        .await
}
