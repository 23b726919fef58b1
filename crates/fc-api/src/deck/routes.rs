use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use fc_core::DeckWithFlashcards;
use fc_db::{
    models::DeckSummary,
    repositories::{deck, flashcard},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    ApiState,
    error::ApiError,
    extract::{ApiPath, ApiQuery},
    validation::validate_search_limit,
};

/// Create the deck routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/decks", get(list_decks))
        .route("/decks/{id}", get(get_deck_by_id))
}

#[derive(Debug, Deserialize)]
struct Pagination {
    limit: Option<i64>,
    #[serde(default)]
    offset: i64,
}

/// List decks, newest first
async fn list_decks(
    State(state): State<ApiState>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Vec<DeckSummary>>, ApiError> {
    let limit = validate_search_limit(page.limit)?;
    let decks = deck::list_decks(&state.pool, limit, page.offset.max(0)).await?;
    Ok(Json(decks))
}

/// Get a deck with its flashcards
async fn get_deck_by_id(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DeckWithFlashcards>, ApiError> {
    let found = deck::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deck not found".to_string()))?;
    let flashcards = flashcard::find_by_deck(&state.pool, id).await?;

    Ok(Json(DeckWithFlashcards {
        deck: found,
        flashcards,
    }))
}
