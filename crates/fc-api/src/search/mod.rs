mod parse;
pub mod routes;
pub mod service;

pub use parse::parse_flashcards;
pub use routes::routes;
pub use service::{FlashcardGenerator, GenerationError, GeneratorConfig};
