use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use fc_core::{
    GenerateFlashcardsRequest, GenerateFlashcardsResponse, SaveFlashcardsRequest,
    SaveFlashcardsResponse, SearchResults,
};
use fc_db::repositories::{deck, flashcard, search as text_search, user};
use serde::Deserialize;

use crate::{
    ApiState,
    error::ApiError,
    extract::{ApiJson, ApiQuery},
    metrics,
    middleware::rate_limit,
    validation::{
        validate_generate_request, validate_query, validate_save_request, validate_search_limit,
    },
};

pub fn routes() -> Router<ApiState> {
    use crate::make_rate_limit_layer;

    // Per-IP limit on generation
    let generate_routes = Router::new()
        .route("/search/generate-flashcards", post(generate_flashcards))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERATE_REPLENISH_SECONDS,
            rate_limit::GENERATE_BURST_SIZE
        ));

    Router::new()
        .merge(generate_routes)
        .route("/search/save-generated-flashcards", post(save_generated_flashcards))
        .route("/search", get(search))
}

async fn generate_flashcards(
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<GenerateFlashcardsRequest>,
) -> Result<Json<GenerateFlashcardsResponse>, ApiError> {
    validate_generate_request(&request)?;

    let generator = state.generator.as_ref().ok_or_else(|| {
        ApiError::NotConfigured("Flashcard generation is not configured".to_string())
    })?;

    let query = request.query.trim();
    let flashcards = generator
        .generate(query, request.num_flashcards as usize)
        .await
        .inspect_err(|_| metrics::record_generation(false, 0))?;

    metrics::record_generation(true, flashcards.len());
    tracing::info!(%query, count = flashcards.len(), "Generated flashcards");

    Ok(Json(GenerateFlashcardsResponse {
        count: flashcards.len(),
        flashcards,
        query: query.to_string(),
    }))
}

async fn save_generated_flashcards(
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<SaveFlashcardsRequest>,
) -> Result<(StatusCode, Json<SaveFlashcardsResponse>), ApiError> {
    validate_save_request(&request)?;

    let owner_id = user::find_active_id_by_username(&state.pool, &state.deck_owner)
        .await?
        .ok_or_else(|| {
            tracing::error!(deck_owner = %state.deck_owner, "Deck owner account is missing");
            ApiError::NotConfigured("Deck owner account does not exist".to_string())
        })?;

    let (questions, answers): (Vec<String>, Vec<String>) = request
        .flashcards
        .iter()
        .map(|c| (c.question.trim().to_string(), c.answer.trim().to_string()))
        .unzip();
    let query = request.query.trim();
    let source_query = (!query.is_empty()).then_some(query);
    let description = source_query.map(|q| format!("Flashcards generated for \"{q}\""));

    let result = async {
        let mut tx = state.pool.begin().await?;
        let created = deck::create_deck(
            &mut *tx,
            owner_id,
            request.deck_name.trim(),
            description.as_deref(),
            source_query,
        )
        .await?;
        let flashcards =
            flashcard::insert_many(&mut *tx, created.id, owner_id, &questions, &answers).await?;
        tx.commit().await?;
        Ok::<_, sqlx::Error>((created, flashcards))
    }
    .await;

    let (created, flashcards) = result.inspect_err(|_| metrics::record_save(false, 0))?;

    metrics::record_save(true, flashcards.len());
    tracing::info!(deck_id = %created.id, count = flashcards.len(), "Saved generated flashcards");

    Ok((
        StatusCode::CREATED,
        Json(SaveFlashcardsResponse {
            count: flashcards.len(),
            deck: created,
            flashcards,
        }),
    ))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
    #[serde(default = "default_true")]
    include_decks: bool,
    #[serde(default = "default_true")]
    include_flashcards: bool,
    limit: Option<i64>,
}

const fn default_true() -> bool {
    true
}

async fn search(
    State(state): State<ApiState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    validate_query(&params.query)?;
    let limit = validate_search_limit(params.limit)?;
    let query = params.query.trim();

    let mut results = SearchResults::default();
    if params.include_decks {
        results.decks = text_search::search_decks(&state.pool, query, limit).await?;
    }
    if params.include_flashcards {
        results.flashcards = text_search::search_flashcards(&state.pool, query, limit).await?;
    }

    tracing::debug!(
        %query,
        decks = results.decks.len(),
        flashcards = results.flashcards.len(),
        "Search completed"
    );
    Ok(Json(results))
}
