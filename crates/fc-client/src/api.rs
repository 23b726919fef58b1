//! Typed gateway to the flashcard service.
//!
//! Every call goes through [`ApiClient::request`], which attaches the JSON
//! content type, merges caller headers, turns non-2xx responses into
//! [`ClientError::Http`] and only then decodes the body.

use std::future::Future;
use std::time::Duration;

use reqwest::{
    Method, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use fc_core::{
    DeckWithFlashcards, GenerateFlashcardsRequest, GenerateFlashcardsResponse, GeneratedFlashcard,
    SaveFlashcardsRequest, SaveFlashcardsResponse, SearchResults,
};

use crate::{config::ClientConfig, error::ClientError, retry::RetryPolicy};

/// The two remote operations the search/generate flow depends on
pub trait FlashcardApi: Send + Sync {
    fn generate_flashcards(
        &self,
        query: &str,
        count: u32,
    ) -> impl Future<Output = Result<GenerateFlashcardsResponse, ClientError>> + Send;

    fn save_generated_flashcards(
        &self,
        flashcards: &[GeneratedFlashcard],
        deck_name: &str,
        query: &str,
    ) -> impl Future<Output = Result<SaveFlashcardsResponse, ClientError>> + Send;
}

/// One request as handed to [`ApiClient::request`]
#[derive(Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Vec<u8>>,
    /// Merged over the defaults; caller values win
    pub headers: HeaderMap,
    /// Whether the retry policy may re-send this request
    pub idempotent: bool,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers: HeaderMap::new(),
            timeout: config.timeout,
            retry: config.retry,
        }
    }

    /// Build a client from `FLASHCARDS_*` environment variables
    pub fn from_env() -> Result<Self, envy::Error> {
        ClientConfig::from_env().map(Self::new)
    }

    /// Headers sent with every request (e.g. an authorization token)
    #[must_use]
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an endpoint such as `/search/generate-flashcards` against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Generate flashcards for `query` on the service
    pub async fn generate_flashcards(
        &self,
        query: &str,
        count: u32,
    ) -> Result<GenerateFlashcardsResponse, ClientError> {
        let body = GenerateFlashcardsRequest {
            query: query.to_string(),
            num_flashcards: count,
        };

        self.request(ApiRequest {
            method: Method::POST,
            url: self.endpoint("/search/generate-flashcards")?,
            body: Some(encode(&body)?),
            headers: HeaderMap::new(),
            idempotent: true,
        })
        .await
    }

    /// Persist generated flashcards into a new deck named `deck_name`.
    ///
    /// Sent exactly once regardless of the retry policy.
    pub async fn save_generated_flashcards(
        &self,
        flashcards: &[GeneratedFlashcard],
        deck_name: &str,
        query: &str,
    ) -> Result<SaveFlashcardsResponse, ClientError> {
        let body = SaveFlashcardsRequest {
            flashcards: flashcards.to_vec(),
            deck_name: deck_name.to_string(),
            query: query.to_string(),
        };

        self.request(ApiRequest {
            method: Method::POST,
            url: self.endpoint("/search/save-generated-flashcards")?,
            body: Some(encode(&body)?),
            headers: HeaderMap::new(),
            idempotent: false,
        })
        .await
    }

    /// Search saved decks and flashcards
    pub async fn search_flashcards(&self, query: &str) -> Result<SearchResults, ClientError> {
        let mut url = self.endpoint("/search")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("include_flashcards", "true");

        self.request(ApiRequest {
            method: Method::GET,
            url,
            body: None,
            headers: HeaderMap::new(),
            idempotent: true,
        })
        .await
    }

    /// Fetch a saved deck with its flashcards
    pub async fn get_deck(&self, deck_id: Uuid) -> Result<DeckWithFlashcards, ClientError> {
        self.request(ApiRequest {
            method: Method::GET,
            url: self.endpoint(&format!("/decks/{deck_id}"))?,
            body: None,
            headers: HeaderMap::new(),
            idempotent: true,
        })
        .await
    }

    /// Send a request and decode its JSON body.
    ///
    /// Non-2xx responses are returned as [`ClientError::Http`] with the raw body text.
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let headers = self.merge_headers(&request.headers);
        let max_retries = if request.idempotent {
            self.retry.max_retries
        } else {
            0
        };

        let mut attempt = 0;
        loop {
            match self.send_once(&request, &headers).await {
                Ok(text) => return decode(text),
                Err(err) if attempt < max_retries && err.is_retryable() => {
                    let backoff = self.retry.backoff_for(attempt);
                    tracing::warn!(
                        attempt,
                        url = %request.url,
                        error = %err,
                        "API request failed, retrying in {:?}",
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(method = %request.method, url = %request.url, "API request failed: {err}");
                    return Err(err);
                }
            }
        }
    }

    fn merge_headers(&self, extra: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in self.default_headers.iter().chain(extra.iter()) {
            headers.insert(name.clone(), value.clone());
        }

        headers
    }

    async fn send_once(&self, request: &ApiRequest, headers: &HeaderMap) -> Result<String, ClientError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .headers(headers.clone());

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(url = %request.url, %status, "Failed to read error body: {e}");
                String::new()
            });
            return Err(ClientError::Http { status, body });
        }

        let body = response.text().await?;

        tracing::debug!(url = %request.url, %status, "API request succeeded");
        Ok(body)
    }
}

impl FlashcardApi for ApiClient {
    async fn generate_flashcards(
        &self,
        query: &str,
        count: u32,
    ) -> Result<GenerateFlashcardsResponse, ClientError> {
        Self::generate_flashcards(self, query, count).await
    }

    async fn save_generated_flashcards(
        &self,
        flashcards: &[GeneratedFlashcard],
        deck_name: &str,
        query: &str,
    ) -> Result<SaveFlashcardsResponse, ClientError> {
        Self::save_generated_flashcards(self, flashcards, deck_name, query).await
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(body).map_err(ClientError::Encode)
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, ClientError> {
    serde_json::from_str(&body).map_err(|source| ClientError::Decode { source, body })
}
