use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    ApiConfig,
    search::{FlashcardGenerator, GeneratorConfig},
};

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    /// `None` when no LLM is configured; generation then answers 503
    pub generator: Option<Arc<FlashcardGenerator>>,
    /// Username that owns decks created through save
    pub deck_owner: String,
}

impl ApiState {
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        let generator = GeneratorConfig::from_api_config(config).map(|generator_config| {
            if generator_config.serpapi_key.is_none() {
                tracing::warn!("Web search not configured (missing SERPAPI_KEY), generating without context");
            }
            Arc::new(FlashcardGenerator::new(generator_config))
        });

        if generator.is_none() {
            tracing::warn!("Flashcard generation not configured (missing OPENAI_API_KEY)");
        }

        Self {
            pool,
            generator,
            deck_owner: config.deck_owner.clone(),
        }
    }
}
