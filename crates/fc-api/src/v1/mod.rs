use axum::Router;

use crate::{deck, search, state::ApiState};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new().merge(search::routes()).merge(deck::routes())
}
