//! Request and response bodies exchanged with the flashcard service.
//!
//! Field names follow the JSON contract (`num_flashcards`, `deck_name`, ...)
//! so the same types serve both ends of the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of flashcards requested when the caller does not say otherwise
pub const DEFAULT_FLASHCARD_COUNT: u32 = 5;

/// Upper bound on flashcards generated per request
pub const MAX_FLASHCARD_COUNT: u32 = 20;

/// Deck name suggested after a successful generation
pub fn default_deck_name(query: &str) -> String {
    format!("Generated: {query}")
}

/// Question/answer pair produced by the generation endpoint, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratedFlashcard {
    pub question: String,
    pub answer: String,
}

impl GeneratedFlashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateFlashcardsRequest {
    pub query: String,
    #[serde(default = "default_count")]
    pub num_flashcards: u32,
}

const fn default_count() -> u32 {
    DEFAULT_FLASHCARD_COUNT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateFlashcardsResponse {
    pub flashcards: Vec<GeneratedFlashcard>,
    pub query: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFlashcardsRequest {
    pub flashcards: Vec<GeneratedFlashcard>,
    pub deck_name: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFlashcardsResponse {
    pub deck: Deck,
    pub flashcards: Vec<StoredFlashcard>,
    pub count: usize,
}

/// Persisted deck of flashcards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Deck {
    pub id: Uuid,
    /// Owner of the deck
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    /// Query the deck was generated from, if any
    pub source_query: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoredFlashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub user_id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredFlashcard {
    /// Drop the persistence metadata, keeping only the card content
    pub fn to_generated(&self) -> GeneratedFlashcard {
        GeneratedFlashcard::new(self.question.clone(), self.answer.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckWithFlashcards {
    #[serde(flatten)]
    pub deck: Deck,
    pub flashcards: Vec<StoredFlashcard>,
}

/// Body of `GET /search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub decks: Vec<Deck>,
    #[serde(default)]
    pub flashcards: Vec<StoredFlashcard>,
}
