//! HTTP client for the flashcard service and the search/generate flow built on it.

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod retry;

pub use api::{ApiClient, FlashcardApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use flow::{FlowError, FlowState, SearchFlow};
pub use retry::RetryPolicy;
