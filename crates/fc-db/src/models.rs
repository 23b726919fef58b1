use chrono::{DateTime, Utc};
use fc_core::Deck;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account without credentials
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Deck listing entry with its card count
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeckSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub deck: Deck,
    pub flashcard_count: i64,
}
