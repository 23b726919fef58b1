//! Core types shared by the flashcard client and service.
//!
//! This crate holds the study data model (interests, flashcard lists), the
//! HTTP contract used to generate and save flashcards, and the library
//! repository that stands in for persistence on the client side.

pub mod contract;
pub mod library;
pub mod model;
pub mod sample;
pub mod validation;

pub use contract::{
    Deck, DeckWithFlashcards, GenerateFlashcardsRequest, GenerateFlashcardsResponse,
    GeneratedFlashcard, SaveFlashcardsRequest, SaveFlashcardsResponse, SearchResults,
    StoredFlashcard,
};
pub use library::{InMemoryLibrary, LibraryError, LibraryRepository};
pub use model::{Flashcard, FlashcardList, Interest, NewFlashcard, NewFlashcardList};
pub use validation::ValidationError;
