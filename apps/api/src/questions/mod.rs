//! Question generation — role-specific interview questions from the LLM,
//! with a static fallback set so the endpoint never fails.

pub mod annotate;
pub mod handlers;
pub mod prompts;

use serde_json::Value;
use tracing::warn;

use crate::llm_client::{fenced_json_block, LlmClient, LlmError};
use crate::models::session::Question;
use crate::questions::annotate::annotate_questions;
use crate::questions::prompts::QUESTION_GENERATION_PROMPT_TEMPLATE;

/// The static question set used whenever the model is unavailable or returns
/// something unusable. Difficulty and time limits come from annotation.
const FALLBACK_QUESTIONS: [&str; 6] = [
    "What is JSX and why do we use it in React?",
    "Explain the difference between props and state in React.",
    "How would you manage side-effects in a React application?",
    "Describe how you would design an authentication flow for a React + Node.js app.",
    "How would you optimize a slow React app that re-renders too often?",
    "Explain how you would design a scalable REST API for a job-matching platform.",
];

/// Generates annotated questions for a role and résumé. Any model failure
/// (missing key, transport, unparseable reply) degrades to the fallback set;
/// this function never returns an error.
pub async fn generate(llm: &LlmClient, role: &str, resume_text: &str) -> Vec<Question> {
    let raw_questions = match generate_via_llm(llm, role, resume_text).await {
        Ok(items) if !items.is_empty() => items,
        Ok(_) => {
            warn!("model returned no usable questions, using fallback set");
            fallback_raw_questions()
        }
        Err(e) => {
            warn!("question generation call failed, using fallback set: {e}");
            fallback_raw_questions()
        }
    };

    annotate_questions(&raw_questions)
}

async fn generate_via_llm(
    llm: &LlmClient,
    role: &str,
    resume_text: &str,
) -> Result<Vec<Value>, LlmError> {
    let prompt = QUESTION_GENERATION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{resume_text}", resume_text);
    let reply = llm.generate(&prompt).await?;
    Ok(parse_question_array(&reply))
}

/// Tolerant parse of the model reply: prefer a fenced JSON block, otherwise
/// start at the first `[`; trailing prose after the array is ignored. Any
/// failure yields an empty list (callers fall back).
fn parse_question_array(reply: &str) -> Vec<Value> {
    let candidate = fenced_json_block(reply).unwrap_or(reply);
    let body = match candidate.find('[') {
        Some(start) => &candidate[start..],
        None => candidate,
    };

    let mut stream = serde_json::Deserializer::from_str(body).into_iter::<Value>();
    match stream.next() {
        Some(Ok(Value::Array(items))) => items,
        _ => {
            let preview: String = reply.chars().take(500).collect();
            warn!("question parse failed, raw preview: {preview}");
            Vec::new()
        }
    }
}

fn fallback_raw_questions() -> Vec<Value> {
    FALLBACK_QUESTIONS
        .iter()
        .map(|text| serde_json::json!({ "text": text }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Difficulty;

    #[tokio::test]
    async fn test_no_key_yields_annotated_fallback_set() {
        let llm = LlmClient::new(None, "gemini-2.5-flash".to_string());
        let questions = generate(&llm, "fullstack", "some resume").await;

        assert_eq!(questions.len(), 6);
        assert_eq!(questions[0].text, FALLBACK_QUESTIONS[0]);
        let bands: Vec<Difficulty> = questions.iter().map(|q| q.difficulty).collect();
        assert_eq!(
            bands,
            vec![
                Difficulty::Easy,
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Hard,
            ]
        );
        let limits: Vec<u32> = questions.iter().map(|q| q.time_limit).collect();
        assert_eq!(limits, vec![20, 20, 60, 60, 120, 120]);
    }

    #[test]
    fn test_parse_question_array_from_fenced_block() {
        let reply = "Sure, here are your questions:\n```json\n[{\"text\": \"Q1?\"}]\n```";
        let items = parse_question_array(reply);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["text"], "Q1?");
    }

    #[test]
    fn test_parse_question_array_skips_leading_prose() {
        let reply = "Here you go: [{\"text\": \"Q1?\"}, {\"text\": \"Q2?\"}] good luck!";
        assert_eq!(parse_question_array(reply).len(), 2);
    }

    #[test]
    fn test_parse_question_array_rejects_non_array() {
        assert!(parse_question_array("{\"text\": \"not an array\"}").is_empty());
        assert!(parse_question_array("no json at all").is_empty());
        assert!(parse_question_array("[{\"text\": broken").is_empty());
    }
}
