// LLM prompt constants for answer evaluation.

/// Evaluation prompt header. Replace `{question_count}` before sending, then
/// append one `Q{n}: ... / A{n}: ...` pair per question.
pub const EVALUATION_PROMPT_HEADER_TEMPLATE: &str = r#"You are an interviewer assistant. Return ONLY valid JSON.
Format:
{
  "perAnswer": [
    {"index": <0-based index>, "score": <0-10>, "feedback": "<short feedback>"}
  ],
  "overall": {"score": <0-100>, "summary": "<short summary>"}
}
There must be exactly {question_count} items in "perAnswer", one for each question.
"#;
