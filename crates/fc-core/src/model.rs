use serde::{Deserialize, Serialize};

/// A research interest shown on the home screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    /// Unique interest identifier
    pub id: String,
    /// Interest title
    pub title: String,
}

/// A single study card belonging to a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// Unique card identifier
    pub id: String,
    /// Front side of the card
    pub question: String,
    /// Back side of the card
    pub answer: String,
    /// Free-form category label
    pub category: String,
    /// ID of the list this card belongs to
    pub list_id: String,
}

/// An ordered list of flashcards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardList {
    /// Unique list identifier
    pub id: String,
    /// List title
    pub title: String,
    /// List description
    pub description: String,
    /// Display color token (e.g. `#FF9500`)
    pub color: String,
    /// Cards in display order
    pub cards: Vec<Flashcard>,
}

impl FlashcardList {
    /// Whether every card points back at this list
    pub fn cards_belong_to_list(&self) -> bool {
        self.cards.iter().all(|card| card.list_id == self.id)
    }
}

/// Input for creating a new list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlashcardList {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
}

/// Input for adding a card to an existing list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: String,
}
