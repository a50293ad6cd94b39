//! Deterministic fallback scorer — a pure function of answer lengths and
//! question difficulty, used whenever the model path fails.

use std::collections::BTreeMap;

use crate::models::evaluation::{EvaluationResult, OverallScore, PerAnswerScore};
use crate::models::session::{Answer, Question};

pub const FALLBACK_SUMMARY: &str = "Fallback heuristic evaluation.";

/// Scores each answer by trimmed length band (0 / 3 / 6 / 8), multiplied by
/// the difficulty factor, rounded and capped at 10. Overall is the per-answer
/// total rescaled to 0–100.
pub fn simple_evaluate(
    questions: &[Question],
    answers: &BTreeMap<usize, Answer>,
) -> EvaluationResult {
    let mut per_answer = Vec::with_capacity(questions.len());
    let mut total = 0.0;

    for (i, question) in questions.iter().enumerate() {
        let text = answers.get(&i).map(|a| a.text.trim()).unwrap_or("");
        let base = match text.len() {
            0 => 0.0,
            1..=29 => 3.0,
            30..=79 => 6.0,
            _ => 8.0,
        };
        let score = (base * question.difficulty.score_multiplier()).round().min(10.0);
        let feedback = if score < 5.0 {
            "Short or missing detail"
        } else {
            "Reasonable answer"
        };
        per_answer.push(PerAnswerScore {
            index: i,
            score,
            feedback: feedback.to_string(),
        });
        total += score;
    }

    let overall_score = if questions.is_empty() {
        0.0
    } else {
        (total / (questions.len() as f64 * 10.0) * 100.0).round()
    };

    EvaluationResult {
        per_answer,
        overall: OverallScore {
            score: overall_score,
            summary: FALLBACK_SUMMARY.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Difficulty;

    fn medium_questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: format!("q-{i}"),
                text: format!("Q{i}?"),
                difficulty: Difficulty::Medium,
                time_limit: 60,
            })
            .collect()
    }

    fn answers_from(texts: &[&str]) -> BTreeMap<usize, Answer> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                (
                    i,
                    Answer {
                        text: t.to_string(),
                        submitted_at: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_length_bands_with_medium_multiplier() {
        let questions = medium_questions(3);
        let answers = answers_from(&[
            "",
            "a short one",
            "a much longer and more detailed answer exceeding eighty characters in total length for this test case",
        ]);
        let result = simple_evaluate(&questions, &answers);

        let scores: Vec<f64> = result.per_answer.iter().map(|p| p.score).collect();
        // round(0), round(3 * 1.1) = 3, round(8 * 1.1) = 9
        assert_eq!(scores, vec![0.0, 3.0, 9.0]);
        // round(12 / 30 * 100)
        assert_eq!(result.overall.score, 40.0);
        assert_eq!(result.overall.summary, FALLBACK_SUMMARY);
    }

    #[test]
    fn test_mid_band_rounds_up() {
        let questions = medium_questions(1);
        // 40 chars → base 6, round(6 * 1.1) = round(6.6) = 7
        let answers = answers_from(&["exactly forty characters of answer text."]);
        let result = simple_evaluate(&questions, &answers);
        assert_eq!(result.per_answer[0].score, 7.0);
        assert_eq!(result.per_answer[0].feedback, "Reasonable answer");
    }

    #[test]
    fn test_hard_long_answer_is_capped_at_ten() {
        let questions = vec![Question {
            id: "q-0".to_string(),
            text: "Q?".to_string(),
            difficulty: Difficulty::Hard,
            time_limit: 120,
        }];
        let long = "x".repeat(100);
        let answers = answers_from(&[long.as_str()]);
        // round(8 * 1.2) = 10, already at the cap
        assert_eq!(simple_evaluate(&questions, &answers).per_answer[0].score, 10.0);
    }

    #[test]
    fn test_unanswered_questions_score_zero() {
        let questions = medium_questions(2);
        let result = simple_evaluate(&questions, &BTreeMap::new());
        assert_eq!(result.per_answer.len(), 2);
        assert!(result.per_answer.iter().all(|p| p.score == 0.0));
        assert!(result
            .per_answer
            .iter()
            .all(|p| p.feedback == "Short or missing detail"));
        assert_eq!(result.overall.score, 0.0);
    }

    #[test]
    fn test_whitespace_only_answer_counts_as_empty() {
        let questions = medium_questions(1);
        let answers = answers_from(&["    \n  "]);
        assert_eq!(simple_evaluate(&questions, &answers).per_answer[0].score, 0.0);
    }

    #[test]
    fn test_determinism() {
        let questions = medium_questions(2);
        let answers = answers_from(&["one answer", "another answer"]);
        let a = simple_evaluate(&questions, &answers);
        let b = simple_evaluate(&questions, &answers);
        assert_eq!(a, b);
    }
}
