//! Turning a chat completion into flashcards.
//!
//! The model is asked for a JSON array but does not always comply, so the
//! reply is read in two passes:
//! 1. the span from the first `[` to the last `]`, parsed as JSON; objects
//!    carrying both `question` and `answer` are kept
//! 2. if that span is missing or not valid JSON, `Q:`/`A:` labelled lines

use std::sync::LazyLock;

use fc_core::GeneratedFlashcard;
use regex::Regex;
use serde_json::Value;

static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("JSON array pattern is valid"));

const QUESTION_LABELS: [&str; 2] = ["Q:", "Question:"];
const ANSWER_LABELS: [&str; 2] = ["A:", "Answer:"];

/// Extract at most `limit` non-blank flashcards from a model reply
pub fn parse_flashcards(reply: &str, limit: usize) -> Vec<GeneratedFlashcard> {
    let cards = parse_json_array(reply).unwrap_or_else(|| parse_labelled_lines(reply));

    cards
        .into_iter()
        .filter(|c| !c.question.trim().is_empty() && !c.answer.trim().is_empty())
        .take(limit)
        .collect()
}

/// `None` when the reply holds no parseable array
fn parse_json_array(reply: &str) -> Option<Vec<GeneratedFlashcard>> {
    let span = JSON_ARRAY.find(reply)?;
    let values: Vec<Value> = match serde_json::from_str(span.as_str()) {
        Ok(values) => values,
        Err(e) => {
            tracing::debug!("Completion array is not valid JSON: {e}");
            return None;
        }
    };

    Some(
        values
            .iter()
            .filter_map(|value| {
                let card = value.as_object()?;
                Some(GeneratedFlashcard::new(
                    stringify(card.get("question")?),
                    stringify(card.get("answer")?),
                ))
            })
            .collect(),
    )
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_labelled_lines(reply: &str) -> Vec<GeneratedFlashcard> {
    let mut cards = Vec::new();
    let mut question: Option<String> = None;

    for line in reply.lines().map(str::trim) {
        if let Some(text) = strip_label(line, &QUESTION_LABELS) {
            question = Some(text.to_string());
        } else if let Some(text) = strip_label(line, &ANSWER_LABELS) {
            if let Some(q) = question.take() {
                cards.push(GeneratedFlashcard::new(q, text));
            }
        }
    }

    cards
}

fn strip_label<'a>(line: &'a str, labels: &[&str]) -> Option<&'a str> {
    labels
        .iter()
        .find_map(|label| line.strip_prefix(label))
        .map(str::trim)
}
