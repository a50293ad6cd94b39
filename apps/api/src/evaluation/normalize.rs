//! Tolerant parsing and normalization of model evaluation output.
//!
//! The model is asked for strict JSON but routinely wraps it in prose or
//! fences, flattens the shape, duplicates indices, or returns them as
//! strings. Normalization accepts all of that and always produces a
//! well-formed `EvaluationResult` with exactly one entry per question index.
//!
//! Indices are treated as plain 0-based throughout; out-of-range entries are
//! simply never consulted when the final sequence is built.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::llm_client::fenced_json_block;
use crate::models::evaluation::{EvaluationResult, OverallScore, PerAnswerScore};

#[derive(Debug, Error)]
pub enum EvalParseError {
    #[error("no JSON object or array found in model reply")]
    NoJsonFound,

    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extracts and decodes the JSON payload of a model reply: a fenced block if
/// present, otherwise the span from the first `{` or `[` to the last matching
/// closing bracket.
pub fn parse_evaluation_reply(reply: &str) -> Result<Value, EvalParseError> {
    let candidate = fenced_json_block(reply).unwrap_or(reply);
    let span = bracketed_span(candidate).ok_or(EvalParseError::NoJsonFound)?;
    Ok(serde_json::from_str(span)?)
}

fn bracketed_span(text: &str) -> Option<&str> {
    let object_start = text.find('{');
    let array_start = text.find('[');

    let (start, closer) = match (object_start, array_start) {
        (Some(o), Some(a)) if o < a => (o, '}'),
        (Some(o), None) => (o, '}'),
        (_, Some(a)) => (a, ']'),
        (None, None) => return None,
    };
    let end = text.rfind(closer)?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Normalizes a decoded model evaluation into the final result shape.
///
/// Accepts either an object with `perAnswer`/`overall` fields or a flat array
/// mixing per-answer items (anything carrying an `index` or `feedback` field)
/// with one overall item (the first remaining object with a numeric `score`).
/// The first item seen for an index wins; missing indices are synthesized.
pub fn normalize_evaluation(raw: &Value, question_count: usize) -> EvaluationResult {
    let mut per_answer_raw: Vec<&Value> = Vec::new();
    let mut overall_raw: Option<&Value> = None;

    match raw {
        Value::Array(items) => {
            for item in items.iter().filter(|i| i.is_object()) {
                if item.get("index").is_some() || has_nonempty_feedback(item) {
                    per_answer_raw.push(item);
                } else if overall_raw.is_none() && item.get("score").is_some() {
                    overall_raw = Some(item);
                }
            }
        }
        Value::Object(map) => {
            if let Some(Value::Array(items)) = map.get("perAnswer") {
                per_answer_raw.extend(items.iter());
            }
            overall_raw = map.get("overall").filter(|v| v.is_object());
        }
        _ => {}
    }

    let mut by_index: BTreeMap<usize, &Value> = BTreeMap::new();
    for item in per_answer_raw {
        if let Some(idx) = parse_index(item.get("index")) {
            by_index.entry(idx).or_insert(item);
        }
    }

    let per_answer = (0..question_count)
        .map(|i| {
            let raw_item = by_index.get(&i);
            PerAnswerScore {
                index: i,
                score: raw_item
                    .and_then(|item| item.get("score"))
                    .and_then(Value::as_f64)
                    .filter(|s| s.is_finite())
                    .unwrap_or(0.0),
                feedback: raw_item
                    .and_then(|item| item.get("feedback"))
                    .and_then(Value::as_str)
                    .filter(|f| !f.is_empty())
                    .unwrap_or("No feedback provided")
                    .to_string(),
            }
        })
        .collect();

    let overall = overall_raw
        .map(|item| OverallScore {
            score: coerce_number(item.get("score")).unwrap_or(0.0),
            summary: item
                .get("summary")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("No overall summary provided")
                .to_string(),
        })
        .unwrap_or_default();

    EvaluationResult {
        per_answer,
        overall,
    }
}

fn has_nonempty_feedback(item: &Value) -> bool {
    match item.get("feedback") {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

// Indices arrive as numbers or numeric strings; anything else is dropped.
fn parse_index(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::Number(n) => n.as_u64().map(|v| v as usize),
        Value::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    }
}

// The overall score tolerates numeric strings (per-answer scores do not).
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
