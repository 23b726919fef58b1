use fc_core::StoredFlashcard;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

/// Insert one card per `(question, answer)` pair in a single statement.
///
/// `questions` and `answers` must have the same length.
pub async fn insert_many<'e, E>(
    executor: E,
    deck_id: Uuid,
    user_id: Uuid,
    questions: &[String],
    answers: &[String],
) -> Result<Vec<StoredFlashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO flashcards (deck_id, user_id, question, answer)
            SELECT $1, $2, card.question, card.answer
            FROM UNNEST($3::TEXT[], $4::TEXT[]) AS card(question, answer)
            RETURNING id, deck_id, user_id, question, answer, created_at, updated_at
        "#,
    )
    .bind(deck_id)
    .bind(user_id)
    .bind(questions)
    .bind(answers)
    .fetch_all(executor)
    .await
}

pub async fn find_by_deck<'e, E>(
    executor: E,
    deck_id: Uuid,
) -> Result<Vec<StoredFlashcard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, user_id, question, answer, created_at, updated_at
            FROM flashcards
            WHERE deck_id = $1
            ORDER BY created_at, id
        "#,
    )
    .bind(deck_id)
    .fetch_all(executor)
    .await
}
