use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::evaluation::EvaluationResult;

/// Difficulty band of an interview question. Drives the default countdown
/// length and the fallback scorer's multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Default per-question time limit in seconds when the generator
    /// did not provide one.
    pub fn default_time_limit(self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 60,
            Difficulty::Hard => 120,
        }
    }

    /// Multiplier applied by the heuristic fallback scorer.
    pub fn score_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.1,
            Difficulty::Hard => 1.2,
        }
    }
}

/// A single interview question. Immutable once a session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub difficulty: Difficulty,
    #[serde(rename = "timeLimit")]
    pub time_limit: u32,
}

/// One recorded answer. At most one per question index; an auto-submit may
/// backfill a missing `submitted_at` but never replaces recorded text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "submittedAt", default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Candidate identity pre-filled from the parsed résumé and confirmed
/// (possibly edited) by the user before the interview starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub filename: String,
}

/// One candidate's interview attempt, from confirmed résumé through final
/// evaluation. `id` and `created_at` are stamped by the store on first upsert
/// when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub candidate: Candidate,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Sparse until completion: only answered indices are present.
    #[serde(default)]
    pub answers: BTreeMap<usize, Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_result: Option<EvaluationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Answer text recorded for a question index, or "" if unanswered.
    pub fn answer_text(&self, index: usize) -> &str {
        self.answers.get(&index).map(|a| a.text.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), r#""easy""#);
        let d: Difficulty = serde_json::from_str(r#""hard""#).unwrap();
        assert_eq!(d, Difficulty::Hard);
    }

    #[test]
    fn test_default_time_limits() {
        assert_eq!(Difficulty::Easy.default_time_limit(), 20);
        assert_eq!(Difficulty::Medium.default_time_limit(), 60);
        assert_eq!(Difficulty::Hard.default_time_limit(), 120);
    }

    #[test]
    fn test_session_answers_roundtrip_with_integer_keys() {
        let mut session = Session::default();
        session.answers.insert(
            2,
            Answer {
                text: "an answer".to_string(),
                submitted_at: None,
            },
        );
        let json = serde_json::to_string(&session).unwrap();
        // JSON object keys are strings on the wire
        assert!(json.contains(r#""answers":{"2""#));
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.answer_text(2), "an answer");
        assert_eq!(back.answer_text(0), "");
    }

    #[test]
    fn test_session_accepts_minimal_payload() {
        let session: Session =
            serde_json::from_str(r#"{"questions": [], "answers": {}}"#).unwrap();
        assert!(session.id.is_none());
        assert!(session.ai_result.is_none());
        assert!(session.completed_at.is_none());
    }
}
