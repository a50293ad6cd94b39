// LLM prompt constants for question generation.

/// Question generation prompt template. Replace `{role}` and `{resume_text}`
/// before sending.
pub const QUESTION_GENERATION_PROMPT_TEMPLATE: &str = r#"You are an interviewer assistant. Given a role ("{role}") and a candidate resume (plain text), generate exactly a JSON array of 6 question objects and return JSON only.
Each object should have:
- "text": a single-line concise question (one sentence)
- "difficulty": "easy" | "medium" | "hard"
- optionally "timeLimit": integer seconds

Instruction: produce 2 easy, then 2 medium, then 2 hard.
Resume:
{resume_text}
"#;
