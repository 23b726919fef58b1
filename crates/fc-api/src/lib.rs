//! HTTP service behind the flashcard client: generation, saving and search.

pub mod config;
pub mod deck;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod search;
pub mod state;
pub mod tracing;
pub mod v1;
pub mod validation;

pub use config::ApiConfig;
pub use state::ApiState;
