use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use fc_client::{ApiClient, ClientConfig, RetryPolicy};
use fc_core::{
    Deck, DeckWithFlashcards, GenerateFlashcardsRequest, GenerateFlashcardsResponse,
    GeneratedFlashcard, SaveFlashcardsRequest, SaveFlashcardsResponse, SearchResults,
    StoredFlashcard,
};
use uuid::Uuid;

/// What the mock service has seen so far
#[derive(Debug, Default)]
pub struct Recorded {
    pub generate_calls: usize,
    pub save_calls: usize,
    pub search_calls: usize,
    pub last_headers: Option<HeaderMap>,
    pub last_search_params: Option<HashMap<String, String>>,
    pub decks: HashMap<Uuid, DeckWithFlashcards>,
}

#[derive(Debug, Default)]
struct Behavior {
    /// Fail this many requests before answering normally
    failures_remaining: usize,
    failure: Option<(StatusCode, String)>,
    delay: Option<Duration>,
    canned: Option<Vec<GeneratedFlashcard>>,
}

/// In-process stand-in for the flashcard service
#[derive(Clone, Default)]
pub struct MockService {
    recorded: Arc<Mutex<Recorded>>,
    behavior: Arc<Mutex<Behavior>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `status` and `body`
    pub fn failing(self, status: StatusCode, body: &str) -> Self {
        self.failing_times(usize::MAX, status, body)
    }

    /// Answer the next `times` requests with `status` and `body`
    pub fn failing_times(self, times: usize, status: StatusCode, body: &str) -> Self {
        {
            let mut behavior = self.behavior.lock().unwrap();
            behavior.failures_remaining = times;
            behavior.failure = Some((status, body.to_string()));
        }
        self
    }

    pub fn delayed(self, delay: Duration) -> Self {
        self.behavior.lock().unwrap().delay = Some(delay);
        self
    }

    /// Return exactly these flashcards from generate
    pub fn with_flashcards(self, cards: Vec<GeneratedFlashcard>) -> Self {
        self.behavior.lock().unwrap().canned = Some(cards);
        self
    }

    pub fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }

    /// Bind to an ephemeral port and return the API base URL
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");

        let app = Router::new()
            .route("/api/v1/search/generate-flashcards", post(generate))
            .route("/api/v1/search/save-generated-flashcards", post(save))
            .route("/api/v1/search", get(search))
            .route("/api/v1/decks/{id}", get(get_deck))
            .with_state(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock server stopped unexpectedly");
        });

        format!("http://{addr}/api/v1")
    }

    /// Spawn the service and return a client pointed at it
    pub async fn client(&self) -> ApiClient {
        let base_url = self.spawn().await;
        ApiClient::new(ClientConfig::new(base_url))
    }

    pub async fn client_with_retry(&self, retry: RetryPolicy) -> ApiClient {
        let base_url = self.spawn().await;
        ApiClient::new(ClientConfig::new(base_url).with_retry(retry))
    }

    /// Record the call and decide whether to fail it
    async fn intercept(&self, headers: &HeaderMap) -> Option<Response> {
        self.recorded().last_headers = Some(headers.clone());

        let (failure, delay) = {
            let mut behavior = self.behavior.lock().unwrap();
            let failure = if behavior.failures_remaining > 0 {
                behavior.failures_remaining -= 1;
                behavior.failure.clone()
            } else {
                None
            };
            (failure, behavior.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        failure.map(|(status, body)| (status, body).into_response())
    }
}

async fn generate(
    State(mock): State<MockService>,
    headers: HeaderMap,
    Json(request): Json<GenerateFlashcardsRequest>,
) -> Response {
    mock.recorded().generate_calls += 1;
    if let Some(failure) = mock.intercept(&headers).await {
        return failure;
    }

    let canned = mock.behavior.lock().unwrap().canned.clone();
    let flashcards = canned.unwrap_or_else(|| {
        (1..=request.num_flashcards)
            .map(|i| {
                GeneratedFlashcard::new(
                    format!("Question {i} about {}", request.query),
                    format!("Answer {i}"),
                )
            })
            .collect()
    });

    Json(GenerateFlashcardsResponse {
        count: flashcards.len(),
        flashcards,
        query: request.query,
    })
    .into_response()
}

async fn save(
    State(mock): State<MockService>,
    headers: HeaderMap,
    Json(request): Json<SaveFlashcardsRequest>,
) -> Response {
    mock.recorded().save_calls += 1;
    if let Some(failure) = mock.intercept(&headers).await {
        return failure;
    }

    if request.deck_name.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "deck_name is required").into_response();
    }

    let now = Utc::now();
    let deck = Deck {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: request.deck_name,
        description: None,
        is_public: false,
        source_query: Some(request.query),
        created_at: now,
        updated_at: now,
    };
    // Stored in reverse to show callers cannot rely on ordering
    let flashcards: Vec<StoredFlashcard> = request
        .flashcards
        .into_iter()
        .rev()
        .map(|card| StoredFlashcard {
            id: Uuid::new_v4(),
            deck_id: deck.id,
            user_id: deck.user_id,
            question: card.question,
            answer: card.answer,
            created_at: now,
            updated_at: now,
        })
        .collect();

    mock.recorded().decks.insert(
        deck.id,
        DeckWithFlashcards {
            deck: deck.clone(),
            flashcards: flashcards.clone(),
        },
    );

    (
        StatusCode::CREATED,
        Json(SaveFlashcardsResponse {
            count: flashcards.len(),
            deck,
            flashcards,
        }),
    )
        .into_response()
}

async fn search(
    State(mock): State<MockService>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    {
        let mut recorded = mock.recorded();
        recorded.search_calls += 1;
        recorded.last_search_params = Some(params.clone());
    }
    if let Some(failure) = mock.intercept(&headers).await {
        return failure;
    }

    let needle = params.get("query").cloned().unwrap_or_default().to_lowercase();
    let recorded = mock.recorded();
    let flashcards = recorded
        .decks
        .values()
        .flat_map(|d| d.flashcards.iter())
        .filter(|c| c.question.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    Json(SearchResults {
        decks: Vec::new(),
        flashcards,
    })
    .into_response()
}

async fn get_deck(State(mock): State<MockService>, Path(id): Path<Uuid>) -> Response {
    match mock.recorded().decks.get(&id) {
        Some(deck) => Json(deck.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Deck not found").into_response(),
    }
}
