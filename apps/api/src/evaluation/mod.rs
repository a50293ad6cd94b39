//! Answer evaluation — model-scored with a deterministic heuristic fallback.
//!
//! The model path builds a transcript prompt, parses the reply tolerantly,
//! and normalizes it into a complete `EvaluationResult`. Every failure along
//! that path (missing key, transport, timeout, unparseable reply) degrades to
//! the heuristic scorer; callers never see an error.

pub mod handlers;
pub mod heuristic;
pub mod normalize;
pub mod prompts;

use std::collections::BTreeMap;

use tracing::warn;

use crate::evaluation::heuristic::simple_evaluate;
use crate::evaluation::normalize::{normalize_evaluation, parse_evaluation_reply, EvalParseError};
use crate::evaluation::prompts::EVALUATION_PROMPT_HEADER_TEMPLATE;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::evaluation::EvaluationResult;
use crate::models::session::{Answer, Question};

#[derive(Debug, thiserror::Error)]
enum EvaluateError {
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Parse(#[from] EvalParseError),
}

/// Evaluates a question/answer transcript. Never fails: the result always
/// covers every question index exactly once.
pub async fn evaluate(
    llm: &LlmClient,
    questions: &[Question],
    answers: &BTreeMap<usize, Answer>,
) -> EvaluationResult {
    match evaluate_via_llm(llm, questions, answers).await {
        Ok(result) => result,
        Err(e) => {
            warn!("model evaluation failed, using heuristic fallback: {e}");
            simple_evaluate(questions, answers)
        }
    }
}

async fn evaluate_via_llm(
    llm: &LlmClient,
    questions: &[Question],
    answers: &BTreeMap<usize, Answer>,
) -> Result<EvaluationResult, EvaluateError> {
    let prompt = build_transcript_prompt(questions, answers);
    let reply = llm.generate(&prompt).await?;
    let raw = parse_evaluation_reply(&reply)?;
    Ok(normalize_evaluation(&raw, questions.len()))
}

/// Enumerates every question with its recorded answer text (empty string if
/// unanswered) below the strict-JSON instruction header.
fn build_transcript_prompt(questions: &[Question], answers: &BTreeMap<usize, Answer>) -> String {
    let mut prompt = EVALUATION_PROMPT_HEADER_TEMPLATE
        .replace("{question_count}", &questions.len().to_string());
    for (i, question) in questions.iter().enumerate() {
        let answer = answers.get(&i).map(|a| a.text.as_str()).unwrap_or("");
        prompt.push_str(&format!(
            "Q{n}: {q}\nA{n}: {a}\n\n",
            n = i + 1,
            q = question.text,
            a = answer
        ));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Difficulty;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: format!("q-{i}"),
                text: format!("Question {i}?"),
                difficulty: Difficulty::Medium,
                time_limit: 60,
            })
            .collect()
    }

    #[test]
    fn test_transcript_enumerates_all_questions() {
        let qs = questions(2);
        let mut answers = BTreeMap::new();
        answers.insert(
            1,
            Answer {
                text: "my answer".to_string(),
                submitted_at: None,
            },
        );

        let prompt = build_transcript_prompt(&qs, &answers);
        assert!(prompt.contains("exactly 2 items"));
        assert!(prompt.contains("Q1: Question 0?\nA1: \n"));
        assert!(prompt.contains("Q2: Question 1?\nA2: my answer\n"));
    }

    #[tokio::test]
    async fn test_no_key_falls_back_to_heuristic() {
        let llm = LlmClient::new(None, "gemini-2.5-flash".to_string());
        let qs = questions(2);
        let result = evaluate(&llm, &qs, &BTreeMap::new()).await;
        assert_eq!(result.per_answer.len(), 2);
        assert_eq!(result.overall.summary, heuristic::FALLBACK_SUMMARY);
    }
}
