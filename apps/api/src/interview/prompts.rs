//! Prompt builders for the mock-interview interactions.
//!
//! Builders are pure: identical inputs always yield the identical prompt
//! string. Required fields are validated here, before any network call.

use crate::errors::AppError;
use crate::interview::Level;

/// System prompt for question generation.
pub const QUESTION_SYSTEM: &str = "You are a helpful interview assistant.";

/// System prompt for answer evaluation.
pub const EVALUATION_SYSTEM: &str = "You are a strict but fair interviewer.";

/// System prompt for spoken-answer feedback.
pub const FEEDBACK_SYSTEM: &str = "You are an expert, encouraging interview coach.";

/// Question generation template. Replace `{level}` and `{role}` before sending.
const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an expert interviewer.
Generate ONE interview question for a {level} {role}.
- The question should be challenging but fair.
- Do NOT add any extra text like "Here is your question:".
- Return only the question text, no explanation."#;

/// Answer evaluation template.
const EVALUATION_PROMPT_TEMPLATE: &str = r#"You are an interviewer.
Role: {role}
Level: {level}

Interview Question: "{question}"
Candidate Answer: "{answer}"

1) Give a score out of 10.
2) Give very short feedback (2-3 lines).
3) Suggest how to improve.

Respond in clear text."#;

/// Spoken-answer feedback template.
const FEEDBACK_PROMPT_TEMPLATE: &str = r#"A user was practicing for an interview.

The question was: "{question}"
The user's answer was: "{transcript}"

Please provide constructive feedback for this answer.
Structure your feedback in two parts:
1. **What Went Well:** (Start with 1-2 positive points).
2. **How to Improve:** (Give 2-3 specific, actionable bullet points for improvement).
Keep the tone friendly and helpful."#;

/// Builds the question-generation prompt for a role and level.
pub fn question_prompt(role: &str, level: Level) -> Result<String, AppError> {
    let role = required(role, "role")?;
    Ok(QUESTION_PROMPT_TEMPLATE
        .replace("{level}", level.as_str())
        .replace("{role}", role))
}

/// Builds the answer-evaluation prompt.
pub fn evaluation_prompt(
    role: &str,
    level: Level,
    question: &str,
    answer: &str,
) -> Result<String, AppError> {
    let role = required(role, "role")?;
    let question = required(question, "question")?;
    let answer = required(answer, "answer")?;
    Ok(EVALUATION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{level}", level.as_str())
        .replace("{question}", question)
        .replace("{answer}", answer))
}

/// Builds the feedback prompt for a transcribed spoken answer.
pub fn feedback_prompt(question: &str, transcript: &str) -> Result<String, AppError> {
    let question = required(question, "question")?;
    let transcript = required(transcript, "transcript")?;
    Ok(FEEDBACK_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{transcript}", transcript))
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("'{field}' is required")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_contains_role_and_level_verbatim() {
        for level in [Level::Junior, Level::MidLevel, Level::Senior] {
            let prompt = question_prompt("Backend Developer", level).unwrap();
            assert!(prompt.contains("Backend Developer"));
            assert!(prompt.contains(level.as_str()));
        }
    }

    #[test]
    fn test_question_prompt_is_deterministic() {
        let a = question_prompt("Data Engineer", Level::Senior).unwrap();
        let b = question_prompt("Data Engineer", Level::Senior).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_question_prompt_rejects_empty_role() {
        let err = question_prompt("   ", Level::Junior).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_evaluation_prompt_contains_question_and_answer() {
        let prompt = evaluation_prompt(
            "Backend Developer",
            Level::Senior,
            "What is an index?",
            "A lookup structure.",
        )
        .unwrap();
        assert!(prompt.contains("What is an index?"));
        assert!(prompt.contains("A lookup structure."));
    }

    #[test]
    fn test_evaluation_prompt_rejects_empty_answer() {
        let err = evaluation_prompt("Backend Developer", Level::Senior, "Q?", "").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_evaluation_prompt_rejects_empty_question() {
        let err = evaluation_prompt("Backend Developer", Level::Senior, "", "A.").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_feedback_prompt_rejects_empty_transcript() {
        let err = feedback_prompt("Tell me about yourself.", "  ").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
