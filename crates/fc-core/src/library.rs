//! Repository abstraction over the user's interests and flashcard lists.
//!
//! Presentation code talks to [`LibraryRepository`] only, so the in-memory
//! store can be swapped for a persistent one without touching callers.

use std::{
    collections::HashSet,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use thiserror::Error;
use uuid::Uuid;

use crate::{
    model::{Flashcard, FlashcardList, Interest, NewFlashcard, NewFlashcardList},
    sample,
    validation::{ValidationError, require_non_blank},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },
    #[error("card {card_id} belongs to list {card_list_id}, not {list_id}")]
    ListMismatch {
        list_id: String,
        card_id: String,
        card_list_id: String,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Storage for interests and flashcard lists
pub trait LibraryRepository: Send + Sync {
    fn list_interests(&self) -> Vec<Interest>;
    fn get_interest(&self, id: &str) -> Option<Interest>;
    /// Add an interest with a generated id
    fn add_interest(&self, title: &str) -> Result<Interest, LibraryError>;
    fn remove_interest(&self, id: &str) -> Result<Interest, LibraryError>;

    fn list_lists(&self) -> Vec<FlashcardList>;
    fn get_list(&self, id: &str) -> Option<FlashcardList>;
    /// Create an empty list with a generated id
    fn create_list(&self, list: NewFlashcardList) -> Result<FlashcardList, LibraryError>;
    /// Replace a list wholesale. Every card must reference the list.
    fn update_list(&self, list: FlashcardList) -> Result<FlashcardList, LibraryError>;
    /// Append a card to a list, assigning its id and `list_id`
    fn add_card(&self, list_id: &str, card: NewFlashcard) -> Result<Flashcard, LibraryError>;

    /// Every card across all lists, in list order
    fn all_flashcards(&self) -> Vec<Flashcard> {
        self.list_lists()
            .into_iter()
            .flat_map(|list| list.cards)
            .collect()
    }
}

#[derive(Debug, Default)]
struct LibraryData {
    interests: Vec<Interest>,
    lists: Vec<FlashcardList>,
}

/// Process-local library. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryLibrary {
    data: RwLock<LibraryData>,
}

impl InMemoryLibrary {
    pub fn new(interests: Vec<Interest>, lists: Vec<FlashcardList>) -> Self {
        Self {
            data: RwLock::new(LibraryData { interests, lists }),
        }
    }

    /// Library seeded with the bundled sample interests and lists
    pub fn with_sample_data() -> Self {
        Self::new(
            sample::sample_interests(),
            sample::sample_flashcard_lists(),
        )
    }

    fn read(&self) -> RwLockReadGuard<'_, LibraryData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LibraryData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl LibraryRepository for InMemoryLibrary {
    fn list_interests(&self) -> Vec<Interest> {
        self.read().interests.clone()
    }

    fn get_interest(&self, id: &str) -> Option<Interest> {
        self.read().interests.iter().find(|i| i.id == id).cloned()
    }

    fn add_interest(&self, title: &str) -> Result<Interest, LibraryError> {
        require_non_blank("title", title)?;

        let interest = Interest {
            id: new_id(),
            title: title.trim().to_string(),
        };
        self.write().interests.push(interest.clone());

        Ok(interest)
    }

    fn remove_interest(&self, id: &str) -> Result<Interest, LibraryError> {
        let mut data = self.write();
        let index = data
            .interests
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| LibraryError::NotFound {
                kind: "interest",
                id: id.to_string(),
            })?;

        Ok(data.interests.remove(index))
    }

    fn list_lists(&self) -> Vec<FlashcardList> {
        self.read().lists.clone()
    }

    fn get_list(&self, id: &str) -> Option<FlashcardList> {
        self.read().lists.iter().find(|l| l.id == id).cloned()
    }

    fn create_list(&self, list: NewFlashcardList) -> Result<FlashcardList, LibraryError> {
        require_non_blank("title", &list.title)?;

        let list = FlashcardList {
            id: new_id(),
            title: list.title.trim().to_string(),
            description: list.description.trim().to_string(),
            color: list.color,
            cards: Vec::new(),
        };
        self.write().lists.push(list.clone());

        Ok(list)
    }

    fn update_list(&self, list: FlashcardList) -> Result<FlashcardList, LibraryError> {
        require_non_blank("title", &list.title)?;

        if let Some(card) = list.cards.iter().find(|c| c.list_id != list.id) {
            return Err(LibraryError::ListMismatch {
                list_id: list.id.clone(),
                card_id: card.id.clone(),
                card_list_id: card.list_id.clone(),
            });
        }

        let mut seen = HashSet::new();
        if let Some(card) = list.cards.iter().find(|c| !seen.insert(c.id.as_str())) {
            return Err(LibraryError::Duplicate {
                kind: "flashcard",
                id: card.id.clone(),
            });
        }

        let mut data = self.write();

        // Card ids must stay unique across the whole library
        for card in &list.cards {
            let taken = data
                .lists
                .iter()
                .filter(|l| l.id != list.id)
                .flat_map(|l| l.cards.iter())
                .any(|c| c.id == card.id);
            if taken {
                return Err(LibraryError::Duplicate {
                    kind: "flashcard",
                    id: card.id.clone(),
                });
            }
        }

        let slot = data
            .lists
            .iter_mut()
            .find(|l| l.id == list.id)
            .ok_or_else(|| LibraryError::NotFound {
                kind: "list",
                id: list.id.clone(),
            })?;
        *slot = list.clone();

        Ok(list)
    }

    fn add_card(&self, list_id: &str, card: NewFlashcard) -> Result<Flashcard, LibraryError> {
        require_non_blank("question", &card.question)?;
        require_non_blank("answer", &card.answer)?;

        let mut data = self.write();
        let list = data
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| LibraryError::NotFound {
                kind: "list",
                id: list_id.to_string(),
            })?;

        let card = Flashcard {
            id: new_id(),
            question: card.question.trim().to_string(),
            answer: card.answer.trim().to_string(),
            category: card.category,
            list_id: list.id.clone(),
        };
        list.cards.push(card.clone());

        Ok(card)
    }
}
