//! Search/generate flow for a single query.
//!
//! ```text
//! Idle ──generate──▶ Generating ──ok──▶ ResultsReady ──save──▶ Saving ──ok──▶ Saved
//!   ▲                    │                  ▲                    │
//!   └──────error─────────┘                  └───────error────────┘
//! ```
//!
//! A failed generate settles in `ResultsReady` instead of `Idle` when earlier
//! results are still on screen; they are kept.
//!
//! Each transition is split in a `start_*` half that validates and returns
//! the request to send, and a `complete_*` half that applies the outcome.
//! [`SearchFlow::generate`] and [`SearchFlow::save`] chain both halves around
//! a [`FlashcardApi`] call. Dropping one of those futures mid-request leaves
//! the outcome unapplied and returns the flow to its previous resting state.

use thiserror::Error;

use fc_core::{
    Deck, GenerateFlashcardsRequest, GenerateFlashcardsResponse, GeneratedFlashcard,
    SaveFlashcardsRequest, SaveFlashcardsResponse, ValidationError,
    contract::{DEFAULT_FLASHCARD_COUNT, default_deck_name},
    validation::require_non_blank,
};

use crate::{api::FlashcardApi, error::ClientError};

const GENERATE_FAILED: &str = "Failed to generate flashcards. Please check your API configuration.";
const SAVE_FAILED: &str = "Failed to save flashcards.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Generating,
    ResultsReady,
    Saving,
    Saved,
}

impl FlowState {
    /// A request is in flight
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Generating | Self::Saving)
    }
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot start while {0:?}")]
    Busy(FlowState),
    #[error("there are no generated flashcards to save")]
    NothingToSave,
    #[error("{message}")]
    Request {
        message: &'static str,
        #[source]
        source: ClientError,
    },
}

impl FlowError {
    /// Text suitable for an alert. Transport and HTTP failures share one message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.message.clone(),
            Self::Request { message, .. } => (*message).to_string(),
            Self::Busy(_) | Self::NothingToSave => self.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct SearchFlow {
    query: String,
    count: u32,
    state: FlowState,
    results: Vec<GeneratedFlashcard>,
    deck_name: String,
    notice: Option<String>,
    last_error: Option<String>,
    saved_deck: Option<Deck>,
}

impl SearchFlow {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: DEFAULT_FLASHCARD_COUNT,
            state: FlowState::Idle,
            results: Vec::new(),
            deck_name: String::new(),
            notice: None,
            last_error: None,
            saved_deck: None,
        }
    }

    /// Number of flashcards to request per generation
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn state(&self) -> FlowState {
        self.state
    }

    pub fn results(&self) -> &[GeneratedFlashcard] {
        &self.results
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn set_deck_name(&mut self, name: impl Into<String>) {
        self.deck_name = name.into();
    }

    /// Last success message
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Last user-facing failure message
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Deck created by the most recent successful save
    pub const fn saved_deck(&self) -> Option<&Deck> {
        self.saved_deck.as_ref()
    }

    /// Enter `Generating` and return the request to send
    pub fn start_generate(&mut self) -> Result<GenerateFlashcardsRequest, FlowError> {
        if self.state.is_busy() {
            return Err(FlowError::Busy(self.state));
        }

        self.state = FlowState::Generating;
        self.notice = None;
        self.last_error = None;
        tracing::debug!(query = %self.query, count = self.count, "Generating flashcards");

        Ok(GenerateFlashcardsRequest {
            query: self.query.clone(),
            num_flashcards: self.count,
        })
    }

    /// Apply the outcome of a generate request. Returns the number of results.
    pub fn complete_generate(
        &mut self,
        outcome: Result<GenerateFlashcardsResponse, ClientError>,
    ) -> Result<usize, FlowError> {
        match outcome {
            Ok(response) => {
                self.results = response.flashcards;
                self.deck_name = default_deck_name(&self.query);
                self.state = FlowState::ResultsReady;
                self.notice = Some(format!(
                    "{} flashcards generated successfully!",
                    response.count
                ));
                tracing::info!(query = %self.query, count = self.results.len(), "Flashcards generated");
                Ok(self.results.len())
            }
            Err(source) => {
                self.state = self.resting_state();
                self.last_error = Some(GENERATE_FAILED.to_string());
                tracing::error!(query = %self.query, "Flashcard generation failed: {source}");
                Err(FlowError::Request {
                    message: GENERATE_FAILED,
                    source,
                })
            }
        }
    }

    /// Enter `Saving` and return the request to send.
    ///
    /// A blank deck name is rejected before anything else and leaves the
    /// flow untouched.
    pub fn start_save(&mut self) -> Result<SaveFlashcardsRequest, FlowError> {
        require_non_blank("deck_name", &self.deck_name)?;

        if self.state.is_busy() {
            return Err(FlowError::Busy(self.state));
        }
        if self.state != FlowState::ResultsReady || self.results.is_empty() {
            return Err(FlowError::NothingToSave);
        }

        self.state = FlowState::Saving;
        self.notice = None;
        self.last_error = None;

        Ok(SaveFlashcardsRequest {
            flashcards: self.results.clone(),
            deck_name: self.deck_name.clone(),
            query: self.query.clone(),
        })
    }

    /// Apply the outcome of a save request
    pub fn complete_save(
        &mut self,
        outcome: Result<SaveFlashcardsResponse, ClientError>,
    ) -> Result<&Deck, FlowError> {
        match outcome {
            Ok(response) => {
                self.results.clear();
                self.state = FlowState::Saved;
                self.notice = Some(format!(
                    "Flashcards saved to deck \"{}\"!",
                    response.deck.name
                ));
                tracing::info!(deck_id = %response.deck.id, count = response.count, "Flashcards saved");
                Ok(self.saved_deck.insert(response.deck))
            }
            Err(source) => {
                self.state = FlowState::ResultsReady;
                self.last_error = Some(SAVE_FAILED.to_string());
                tracing::error!(deck_name = %self.deck_name, "Saving flashcards failed: {source}");
                Err(FlowError::Request {
                    message: SAVE_FAILED,
                    source,
                })
            }
        }
    }

    /// Forget an in-flight request without applying its outcome
    pub fn abandon(&mut self) {
        if self.state.is_busy() {
            tracing::debug!(state = ?self.state, "Abandoning in-flight request");
            self.state = self.resting_state();
        }
    }

    /// Generate flashcards for the query through `api`
    pub async fn generate<A: FlashcardApi>(&mut self, api: &A) -> Result<usize, FlowError> {
        let request = self.start_generate()?;
        let in_flight = InFlight::new(self);
        let outcome = api
            .generate_flashcards(&request.query, request.num_flashcards)
            .await;
        in_flight.finish().complete_generate(outcome)
    }

    /// Save the current results into a deck named after [`SearchFlow::deck_name`]
    pub async fn save<A: FlashcardApi>(&mut self, api: &A) -> Result<&Deck, FlowError> {
        let request = self.start_save()?;
        let in_flight = InFlight::new(self);
        let outcome = api
            .save_generated_flashcards(&request.flashcards, &request.deck_name, &request.query)
            .await;
        in_flight.finish().complete_save(outcome)
    }

    /// Where the flow settles when no request is pending
    fn resting_state(&self) -> FlowState {
        if self.results.is_empty() {
            FlowState::Idle
        } else {
            FlowState::ResultsReady
        }
    }
}

/// Rolls the flow back with [`SearchFlow::abandon`] if dropped before `finish`
struct InFlight<'a> {
    flow: Option<&'a mut SearchFlow>,
}

impl<'a> InFlight<'a> {
    const fn new(flow: &'a mut SearchFlow) -> Self {
        Self { flow: Some(flow) }
    }

    fn finish(mut self) -> &'a mut SearchFlow {
        match self.flow.take() {
            Some(flow) => flow,
            None => unreachable!("in-flight guard finished twice"),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(flow) = self.flow.take() {
            flow.abandon();
        }
    }
}
