use fc_db::repositories::{deck, flashcard, search, user};
use uuid::Uuid;

use crate::common;

async fn owner(pool: &sqlx::PgPool) -> Uuid {
    user::create_user(pool, "owner", "owner@example.com", "hash", false)
        .await
        .expect("Failed to create owner")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_deck_with_flashcards_round_trip() {
    let pool = common::fresh_pool().await.expect("Failed to prepare database");
    let user_id = owner(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    let created = deck::create_deck(&mut *tx, user_id, "Biology", None, Some("cells"))
        .await
        .unwrap();
    let cards = flashcard::insert_many(
        &mut *tx,
        created.id,
        user_id,
        &strings(&["What is a cell?", "What is DNA?"]),
        &strings(&["The unit of life", "Genetic material"]),
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(cards.len(), 2);
    assert!(cards.iter().all(|c| c.deck_id == created.id));

    let found = deck::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.source_query.as_deref(), Some("cells"));

    let mut questions: Vec<_> = flashcard::find_by_deck(&pool, created.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.question)
        .collect();
    questions.sort();
    assert_eq!(questions, ["What is DNA?", "What is a cell?"]);

    let listed = deck::list_decks(&pool, 10, 0).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].flashcard_count, 2);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_blank_card_rejected_by_constraint() {
    let pool = common::fresh_pool().await.expect("Failed to prepare database");
    let user_id = owner(&pool).await;
    let created = deck::create_deck(&pool, user_id, "Deck", None, None)
        .await
        .unwrap();

    let result = flashcard::insert_many(
        &pool,
        created.id,
        user_id,
        &strings(&["   "]),
        &strings(&["answer"]),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_search_ranks_primary_field_higher() {
    let pool = common::fresh_pool().await.expect("Failed to prepare database");
    let user_id = owner(&pool).await;

    let in_name = deck::create_deck(&pool, user_id, "Photosynthesis basics", None, None)
        .await
        .unwrap();
    let in_description = deck::create_deck(
        &pool,
        user_id,
        "Plant biology",
        Some("Covers photosynthesis in leaves"),
        None,
    )
    .await
    .unwrap();
    deck::create_deck(&pool, user_id, "Algebra", None, None)
        .await
        .unwrap();

    let hits = search::search_decks(&pool, "photosynthesis", 10).await.unwrap();

    let ids: Vec<_> = hits.iter().map(|d| d.id).collect();
    assert_eq!(ids, [in_name.id, in_description.id]);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_search_flashcards_matches_any_term_and_limits() {
    let pool = common::fresh_pool().await.expect("Failed to prepare database");
    let user_id = owner(&pool).await;
    let created = deck::create_deck(&pool, user_id, "Cells", None, None)
        .await
        .unwrap();
    flashcard::insert_many(
        &pool,
        created.id,
        user_id,
        &strings(&[
            "What is the mitochondria?",
            "What does the nucleus hold?",
            "What is a ribosome?",
        ]),
        &strings(&["The powerhouse", "DNA", "Protein factory"]),
    )
    .await
    .unwrap();

    let hits = search::search_flashcards(&pool, "mitochondria nucleus", 10)
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);

    let limited = search::search_flashcards(&pool, "mitochondria nucleus", 1)
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);

    let partial = search::search_flashcards(&pool, "ribo", 10).await.unwrap();
    assert_eq!(partial.len(), 1);
}
