//! Question annotation — turns loosely-shaped raw question items (from the
//! model or the static fallback) into well-formed `Question` records.
//!
//! Total function: always returns exactly one record per input item.

use serde_json::Value;

use crate::models::session::{Difficulty, Question};

/// Annotates a raw question list. For each item: text from the first
/// non-empty of several field names, difficulty from a difficulty-like field
/// else by position, time limit from a positive finite numeric field else the
/// difficulty default, and a stable `q-{index}` id when none is provided.
pub fn annotate_questions(raw_questions: &[Value]) -> Vec<Question> {
    let total = raw_questions.len();

    raw_questions
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let text = first_text_field(raw);
            let difficulty =
                parse_difficulty(raw).unwrap_or_else(|| difficulty_by_index(idx, total));
            let time_limit =
                provided_time_limit(raw).unwrap_or_else(|| difficulty.default_time_limit());
            let id = raw
                .get("id")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .unwrap_or_else(|| format!("q-{idx}"));

            Question {
                id,
                text: if text.is_empty() {
                    format!("(question {})", idx + 1)
                } else {
                    text
                },
                difficulty,
                time_limit,
            }
        })
        .collect()
}

fn first_text_field(raw: &Value) -> String {
    for field in ["text", "question", "prompt"] {
        if let Some(s) = raw.get(field).and_then(|v| v.as_str()) {
            let s = s.trim();
            if !s.is_empty() {
                return s.to_string();
            }
        }
    }
    String::new()
}

fn parse_difficulty(raw: &Value) -> Option<Difficulty> {
    let label = ["difficulty", "level"]
        .iter()
        .find_map(|f| raw.get(*f).and_then(|v| v.as_str()))?
        .to_lowercase();

    if label.contains("easy") || label.starts_with('e') {
        Some(Difficulty::Easy)
    } else if label.contains("medium") || label.starts_with('m') {
        Some(Difficulty::Medium)
    } else if label.contains("hard") || label.starts_with('h') {
        Some(Difficulty::Hard)
    } else {
        None
    }
}

/// Positional assignment. The canonical 6-question set splits 2/2/2; any
/// other count splits at ceil(N/3) and ceil(2N/3).
fn difficulty_by_index(idx: usize, total: usize) -> Difficulty {
    if total == 6 {
        return match idx {
            0 | 1 => Difficulty::Easy,
            2 | 3 => Difficulty::Medium,
            _ => Difficulty::Hard,
        };
    }
    if idx < total.div_ceil(3) {
        Difficulty::Easy
    } else if idx < (2 * total).div_ceil(3) {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

fn provided_time_limit(raw: &Value) -> Option<u32> {
    for field in ["timeLimit", "time_seconds", "seconds", "time"] {
        let value = match raw.get(field) {
            Some(v) => v,
            None => continue,
        };
        // numbers directly, numeric strings coerced
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        if let Some(secs) = parsed {
            if secs.is_finite() && secs > 0.0 {
                return Some(secs as u32);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn difficulties(questions: &[Question]) -> Vec<Difficulty> {
        questions.iter().map(|q| q.difficulty).collect()
    }

    #[test]
    fn test_six_bare_questions_get_two_per_band() {
        let raw: Vec<Value> = (0..6).map(|i| json!({"text": format!("Q{i}?")})).collect();
        let annotated = annotate_questions(&raw);
        assert_eq!(
            difficulties(&annotated),
            vec![
                Difficulty::Easy,
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Hard,
            ]
        );
        let limits: Vec<u32> = annotated.iter().map(|q| q.time_limit).collect();
        assert_eq!(limits, vec![20, 20, 60, 60, 120, 120]);
        let ids: Vec<&str> = annotated.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-0", "q-1", "q-2", "q-3", "q-4", "q-5"]);
    }

    #[test]
    fn test_annotation_is_idempotent_on_annotated_output() {
        let raw: Vec<Value> = (0..6).map(|i| json!({"text": format!("Q{i}?")})).collect();
        let first = annotate_questions(&raw);
        let reannotated = annotate_questions(
            &first
                .iter()
                .map(|q| serde_json::to_value(q).unwrap())
                .collect::<Vec<_>>(),
        );
        assert_eq!(first.len(), reannotated.len());
        assert_eq!(difficulties(&first), difficulties(&reannotated));
        for (a, b) in first.iter().zip(&reannotated) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.time_limit, b.time_limit);
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn test_non_six_count_uses_ceil_split() {
        let raw: Vec<Value> = (0..4).map(|i| json!({"text": format!("Q{i}?")})).collect();
        // ceil(4/3)=2 easy, up to ceil(8/3)=3 medium, remainder hard
        assert_eq!(
            difficulties(&annotate_questions(&raw)),
            vec![
                Difficulty::Easy,
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Hard,
            ]
        );
    }

    #[test]
    fn test_difficulty_from_keyword_or_prefix() {
        let raw = vec![
            json!({"text": "a?", "difficulty": "Very Hard"}),
            json!({"text": "b?", "level": "m"}),
            json!({"text": "c?", "difficulty": "effortless"}),
        ];
        let annotated = annotate_questions(&raw);
        assert_eq!(annotated[0].difficulty, Difficulty::Hard);
        assert_eq!(annotated[1].difficulty, Difficulty::Medium);
        // "effortless" starts with 'e'
        assert_eq!(annotated[2].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_provided_time_limit_wins_when_positive() {
        let raw = vec![
            json!({"text": "a?", "difficulty": "easy", "timeLimit": 45}),
            json!({"text": "b?", "difficulty": "easy", "seconds": "30"}),
            json!({"text": "c?", "difficulty": "easy", "timeLimit": -5}),
            json!({"text": "d?", "difficulty": "easy", "timeLimit": "not a number"}),
        ];
        let annotated = annotate_questions(&raw);
        assert_eq!(annotated[0].time_limit, 45);
        assert_eq!(annotated[1].time_limit, 30);
        assert_eq!(annotated[2].time_limit, 20);
        assert_eq!(annotated[3].time_limit, 20);
    }

    #[test]
    fn test_text_alternatives_and_placeholder() {
        let raw = vec![
            json!({"question": "From question field?"}),
            json!({"prompt": "From prompt field?"}),
            json!({"text": "   "}),
        ];
        let annotated = annotate_questions(&raw);
        assert_eq!(annotated[0].text, "From question field?");
        assert_eq!(annotated[1].text, "From prompt field?");
        assert_eq!(annotated[2].text, "(question 3)");
    }

    #[test]
    fn test_provided_id_is_kept() {
        let raw = vec![json!({"id": "custom-7", "text": "a?"})];
        assert_eq!(annotate_questions(&raw)[0].id, "custom-7");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(annotate_questions(&[]).is_empty());
    }
}
