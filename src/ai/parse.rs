//! Parsing model replies into suggestions
//!
//! Replies are "JSON-ish": fenced or bare, sometimes wrapped in prose,
//! sometimes a bare array, with field names that drift between models.
//! Parsing is lenient about shape and strict about one thing: every
//! suggestion must point at text that actually exists in the input.

use crate::ai::{AiError, AiResult};
use crate::models::{Category, Severity, Span, Suggestion, SuggestionSource};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

const DEFAULT_MODEL_CONFIDENCE: f64 = 0.75;

const ORIGINAL_KEYS: &[&str] = &["original", "text", "error", "incorrect", "span"];
const REPLACEMENT_KEYS: &[&str] = &["replacement", "suggestion", "correction", "corrected", "fix"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "reason", "rationale", "message"];
const CATEGORY_KEYS: &[&str] = &["category", "type"];
const SEVERITY_KEYS: &[&str] = &["severity", "priority"];
const LIST_KEYS: &[&str] = &["suggestions", "corrections", "errors", "issues"];
const SUMMARY_KEYS: &[&str] = &["summary", "feedback", "overall"];

static FENCE_PATTERN: OnceLock<Regex> = OnceLock::new();
static TRAILING_COMMA: OnceLock<Regex> = OnceLock::new();

fn fence_pattern() -> &'static Regex {
    // (?s) so the fenced body can span lines
    FENCE_PATTERN.get_or_init(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").expect("valid regex"))
}

fn trailing_comma() -> &'static Regex {
    TRAILING_COMMA.get_or_init(|| Regex::new(r",(\s*[}\]])").expect("valid regex"))
}

/// One suggestion as the model stated it, before locating it in the text
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSuggestion {
    pub original: String,
    pub replacement: Option<String>,
    pub category: Category,
    pub severity: Severity,
    pub explanation: String,
    pub confidence: f64,
}

/// Parsed model reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReview {
    /// Model's own 0-100 score, if it gave a usable one
    pub score: Option<f64>,
    pub summary: Option<String>,
    pub suggestions: Vec<ModelSuggestion>,
}

fn first_string(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

fn as_number(value: &Value) -> Option<f64> {
    let number: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Fenced JSON bodies, in reply order
fn fenced_bodies(reply: &str) -> Vec<&str> {
    fence_pattern()
        .captures_iter(reply)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// The first complete JSON value starting at `body`, ignoring whatever
/// follows it
fn leading_value(body: &str) -> Option<Value> {
    serde_json::Deserializer::from_str(body)
        .into_iter::<Value>()
        .next()?
        .ok()
}

/// JSON values embedded in prose, one attempt per opening bracket
fn embedded_values(reply: &str) -> impl Iterator<Item = Value> + '_ {
    reply
        .match_indices(['{', '['])
        .filter_map(move |(start, _)| leading_value(&reply[start..]))
}

/// Everything from the first opening bracket to the last closing one
fn outer_span(reply: &str) -> Option<&str> {
    let start = reply.find(['{', '['])?;
    let end = reply.rfind(['}', ']'])?;
    (start < end).then(|| &reply[start..=end])
}

fn parse_value(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok().or_else(|| {
        let repaired = trailing_comma().replace_all(body, "$1");
        serde_json::from_str(&repaired).ok()
    })
}

fn parse_suggestion(value: &Value) -> Option<ModelSuggestion> {
    let obj = value.as_object()?;
    let original = first_string(obj, ORIGINAL_KEYS)?.trim().to_string();
    if original.is_empty() {
        return None;
    }
    let replacement = first_string(obj, REPLACEMENT_KEYS).map(|r| r.trim().to_string());
    let category = first_string(obj, CATEGORY_KEYS)
        .map(|c| Category::from_loose(&c))
        .unwrap_or(Category::Grammar);
    let severity = first_string(obj, SEVERITY_KEYS)
        .and_then(|s| s.parse().ok())
        .unwrap_or(Severity::Medium);
    let confidence = obj
        .get("confidence")
        .and_then(as_number)
        .map(|c| if c > 1.0 { c / 100.0 } else { c })
        .unwrap_or(DEFAULT_MODEL_CONFIDENCE)
        .clamp(0.0, 1.0);

    Some(ModelSuggestion {
        original,
        replacement,
        category,
        severity,
        explanation: first_string(obj, EXPLANATION_KEYS).unwrap_or_default(),
        confidence,
    })
}

fn review_from_value(value: Value) -> Option<ModelReview> {
    match value {
        // A bare list only counts when it holds objects; "[1]" in prose does not
        Value::Array(items) if items.iter().all(Value::is_object) => Some(ModelReview {
            score: None,
            summary: None,
            suggestions: items.iter().filter_map(parse_suggestion).collect(),
        }),
        Value::Object(obj) => {
            let list = LIST_KEYS
                .iter()
                .find_map(|k| obj.get(*k).and_then(Value::as_array));
            let score = obj.get("score").and_then(as_number).map(|s| s.clamp(0.0, 100.0));
            let summary = first_string(&obj, SUMMARY_KEYS).filter(|s| !s.trim().is_empty());
            if list.is_none() && score.is_none() {
                return None;
            }
            Some(ModelReview {
                score,
                summary,
                suggestions: list
                    .map(|items| items.iter().filter_map(parse_suggestion).collect())
                    .unwrap_or_default(),
            })
        }
        _ => None,
    }
}

/// Parse a model reply.
///
/// Accepts fenced JSON, bare JSON, JSON surrounded by prose, a bare array of
/// suggestions, and trailing commas. Fails with [`AiError::ParseError`] when
/// nothing review-shaped can be found.
pub fn parse_review(reply: &str) -> AiResult<ModelReview> {
    for body in fenced_bodies(reply) {
        if let Some(review) = parse_value(body).and_then(review_from_value) {
            return Ok(review);
        }
    }
    if let Some(review) = embedded_values(reply).find_map(review_from_value) {
        return Ok(review);
    }
    // Last resort for almost-JSON such as trailing commas
    if let Some(review) = outer_span(reply)
        .and_then(parse_value)
        .and_then(review_from_value)
    {
        return Ok(review);
    }
    let preview: String = reply.chars().take(80).collect();
    Err(AiError::ParseError(format!(
        "no review JSON in model reply: {:?}",
        preview
    )))
}

/// Map model suggestions onto spans of `text`.
///
/// Each `original` is searched ASCII case-insensitively, earliest hit first.
/// Repeated phrases advance through the text so the second report of
/// "a apple" lands on the second occurrence. Suggestions that cannot be
/// located, or whose replacement is identical to the original, are dropped.
pub fn locate_suggestions(text: &str, review: &ModelReview) -> Vec<Suggestion> {
    let lowered = text.to_ascii_lowercase();
    let mut cursors: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();

    for ms in &review.suggestions {
        if ms.replacement.as_deref() == Some(ms.original.as_str()) {
            debug!("Dropping no-op model suggestion for {:?}", ms.original);
            continue;
        }
        let needle_lower = ms.original.to_ascii_lowercase();
        let from = cursors.get(&needle_lower).copied().unwrap_or(0);

        // ASCII lowering keeps byte offsets, so the earliest hit in any
        // case is also a valid span of `text`
        let found = lowered[from..].find(&needle_lower).map(|pos| from + pos);

        let Some(start) = found else {
            debug!("Model suggestion not found in text: {:?}", ms.original);
            continue;
        };
        let span = Span::new(start, start + ms.original.len());
        cursors.insert(needle_lower, span.end);

        out.push(Suggestion::new(
            text,
            span,
            "model",
            SuggestionSource::Model,
            ms.category,
            ms.severity,
            ms.replacement.clone(),
            ms.category.title(),
            ms.explanation.clone(),
            ms.confidence,
        ));
    }
    out
}
