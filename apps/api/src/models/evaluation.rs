use serde::{Deserialize, Serialize};

/// Score and feedback for one answered (or unanswered) question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerAnswerScore {
    pub index: usize,
    /// 0–10.
    pub score: f64,
    pub feedback: String,
}

/// Aggregate 0–100 score plus a short summary for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: f64,
    pub summary: String,
}

impl Default for OverallScore {
    fn default() -> Self {
        OverallScore {
            score: 0.0,
            summary: "No overall provided".to_string(),
        }
    }
}

/// A well-formed evaluation: exactly one `per_answer` entry per question
/// index, in index order, regardless of what the upstream model returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(rename = "perAnswer")]
    pub per_answer: Vec<PerAnswerScore>,
    pub overall: OverallScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_result_wire_field_names() {
        let result = EvaluationResult {
            per_answer: vec![PerAnswerScore {
                index: 0,
                score: 7.0,
                feedback: "Reasonable answer".to_string(),
            }],
            overall: OverallScore {
                score: 70.0,
                summary: "ok".to_string(),
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("perAnswer").is_some());
        assert_eq!(json["overall"]["score"], 70.0);
    }

    #[test]
    fn test_default_overall_placeholder() {
        let overall = OverallScore::default();
        assert_eq!(overall.score, 0.0);
        assert_eq!(overall.summary, "No overall provided");
    }
}
