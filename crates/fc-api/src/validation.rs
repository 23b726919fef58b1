use fc_core::{
    GenerateFlashcardsRequest, SaveFlashcardsRequest,
    contract::MAX_FLASHCARD_COUNT,
    validation::require_non_blank,
};

use crate::error::ApiError;

pub const MAX_QUERY_LENGTH: usize = 500;
pub const MAX_DECK_NAME_LENGTH: usize = 255;
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;
pub const MAX_SEARCH_LIMIT: i64 = 50;

fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::Validation(format!(
            "{field} must be at most {max} characters long"
        )));
    }
    Ok(())
}

/// Validate a search or generation query
pub fn validate_query(query: &str) -> Result<(), ApiError> {
    require_non_blank("query", query)?;
    validate_max_length("Query", query.trim(), MAX_QUERY_LENGTH)
}

pub fn validate_generate_request(request: &GenerateFlashcardsRequest) -> Result<(), ApiError> {
    validate_query(&request.query)?;

    if !(1..=MAX_FLASHCARD_COUNT).contains(&request.num_flashcards) {
        return Err(ApiError::Validation(format!(
            "num_flashcards must be between 1 and {MAX_FLASHCARD_COUNT}"
        )));
    }

    Ok(())
}

pub fn validate_save_request(request: &SaveFlashcardsRequest) -> Result<(), ApiError> {
    require_non_blank("deck_name", &request.deck_name)?;
    validate_max_length("Deck name", request.deck_name.trim(), MAX_DECK_NAME_LENGTH)?;

    if request.flashcards.is_empty() {
        return Err(ApiError::Validation(
            "At least one flashcard is required".to_string(),
        ));
    }

    for (index, card) in request.flashcards.iter().enumerate() {
        if card.question.trim().is_empty() || card.answer.trim().is_empty() {
            return Err(ApiError::Validation(format!(
                "Flashcard {} needs both a question and an answer",
                index + 1
            )));
        }
    }

    Ok(())
}

/// Resolve the `limit` query parameter
pub fn validate_search_limit(limit: Option<i64>) -> Result<i64, ApiError> {
    let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and {MAX_SEARCH_LIMIT}"
        )));
    }

    Ok(limit)
}
