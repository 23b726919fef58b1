//! Flashcard generation pipeline.
//!
//! web search (optional) → prompt → chat completion → [`parse_flashcards`]
//!
//! Both upstreams speak plain JSON over HTTP, so any SerpAPI or OpenAI
//! compatible endpoint can be configured.

use std::time::Duration;

use fc_core::GeneratedFlashcard;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::parse::parse_flashcards;
use crate::{config::ApiConfig, metrics};

/// Organic results used as context
pub const SEARCH_RESULT_LIMIT: usize = 5;
/// Characters kept from each search result
pub const MAX_PIECE_CHARS: usize = 1000;
/// Characters of context placed in the prompt
pub const MAX_PROMPT_CONTENT_CHARS: usize = 2000;

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);
const SYSTEM_PROMPT: &str =
    "You are an educational assistant that creates high-quality flashcards.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned {status}: {body}")]
    HttpStatus {
        service: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("{service} response could not be decoded: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("completion contained no message")]
    EmptyCompletion,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub serpapi_key: Option<String>,
    pub serpapi_url: String,
}

impl GeneratorConfig {
    /// `None` when no LLM key is configured
    pub fn from_api_config(config: &ApiConfig) -> Option<Self> {
        if !config.generation_enabled() {
            return None;
        }

        Some(Self {
            openai_api_key: config.openai_api_key.clone().unwrap_or_default(),
            openai_base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
            serpapi_key: config.serpapi_key.clone().filter(|k| !k.trim().is_empty()),
            serpapi_url: config.serpapi_base_url.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    snippet: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FlashcardGenerator {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl FlashcardGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Generate up to `count` flashcards about `query`
    pub async fn generate(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<GeneratedFlashcard>, GenerationError> {
        let context = match self.search_context(query).await {
            Ok(context) => context,
            Err(e) => {
                metrics::record_web_search(false);
                tracing::warn!(%query, "Web search failed, generating without context: {e}");
                String::new()
            }
        };

        let prompt = build_prompt(query, &context, count);
        let reply = self.complete(&prompt).await?;
        let cards = parse_flashcards(&reply, count);

        tracing::debug!(%query, requested = count, parsed = cards.len(), "Parsed completion");
        Ok(cards)
    }

    /// Titles and snippets of the top results, empty when search is not configured
    async fn search_context(&self, query: &str) -> Result<String, GenerationError> {
        const SERVICE: &str = "web search";

        let Some(key) = &self.config.serpapi_key else {
            return Ok(String::new());
        };

        let num = SEARCH_RESULT_LIMIT.to_string();
        let response = self
            .http
            .get(&self.config.serpapi_url)
            .query(&[("q", query), ("api_key", key.as_str()), ("num", num.as_str())])
            .timeout(UPSTREAM_TIMEOUT)
            .send()
            .await
            .map_err(|source| GenerationError::Transport {
                service: SERVICE,
                source,
            })?;

        let results: SearchResponse = decode(SERVICE, response).await?;
        metrics::record_web_search(true);

        Ok(results
            .organic_results
            .iter()
            .take(SEARCH_RESULT_LIMIT)
            .map(|r| {
                let piece = [r.title.as_deref(), r.snippet.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(": ");
                truncate_chars(&piece, MAX_PIECE_CHARS)
            })
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        const SERVICE: &str = "completion";

        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.openai_base_url))
            .bearer_auth(&self.config.openai_api_key)
            .json(&body)
            .timeout(UPSTREAM_TIMEOUT)
            .send()
            .await
            .map_err(|source| GenerationError::Transport {
                service: SERVICE,
                source,
            })?;

        let completion: ChatResponse = decode(SERVICE, response).await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyCompletion)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, GenerationError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationError::HttpStatus {
            service,
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|source| GenerationError::Decode { service, source })
}

fn build_prompt(query: &str, content: &str, count: usize) -> String {
    let content = truncate_chars(content, MAX_PROMPT_CONTENT_CHARS);

    format!(
        "Based on the following content and search query, generate {count} educational flashcards.\n\
         \n\
         Search Query: {query}\n\
         Content: {content}\n\
         \n\
         Generate flashcards in the following format:\n\
         - Each flashcard should have a clear question and answer\n\
         - Questions should be educational and relevant to the search query\n\
         - Answers should be concise but informative\n\
         - Cover different aspects of the topic\n\
         \n\
         Return the flashcards as a JSON array of objects with 'question' and 'answer' fields."
    )
}

/// First `max` characters of `s`, whitespace collapsed
fn truncate_chars(s: &str, max: usize) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max)
        .collect()
}
