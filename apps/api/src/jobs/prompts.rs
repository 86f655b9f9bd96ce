//! Prompt builder and canned replies for the job-chat interaction.

use crate::errors::AppError;

/// System prompt for the job-search completion.
pub const JOB_SEARCH_SYSTEM: &str = "You are a job search assistant. \
    You find realistic, currently plausible job openings matching the user's request \
    and present them in exactly the record format you are given. \
    Do NOT include any text outside the job records.";

/// Guidance reply for chat messages that are not job queries.
pub const GUIDANCE_MESSAGE: &str = "I'm here to help you find jobs! Please describe \
    what kind of job you're looking for. For example: 'Find me remote Python developer jobs' \
    or 'Looking for senior data scientist positions in New York'.";

/// Job-search template. Replace `{message}` before sending.
/// The record format must stay in lockstep with the markers in `listing.rs`.
const JOB_SEARCH_PROMPT_TEMPLATE: &str = r#"Find job openings matching this request: {message}

Return each job as a markdown bullet record in EXACTLY this format:

- **Title:** <job title>
  **Company:** <company name>
  **Type:** <Full-time | Part-time | Contract>
  **Office:** <Remote | Hybrid | On-site>
  **Location:** <city, country>
  **Experience Level:** <Entry | Mid | Senior>
  **Salary:** <salary range, or "Not disclosed">
  **Apply:** [Apply here](<application url>)

Return 3 to 6 records and nothing else — no introduction, no closing text."#;

/// Builds the job-search prompt from a chat message.
pub fn job_search_prompt(message: &str) -> Result<String, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("'message' is required".to_string()));
    }
    Ok(JOB_SEARCH_PROMPT_TEMPLATE.replace("{message}", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_search_prompt_contains_message_verbatim() {
        let prompt = job_search_prompt("remote Rust jobs in Europe").unwrap();
        assert!(prompt.contains("remote Rust jobs in Europe"));
    }

    #[test]
    fn test_job_search_prompt_pins_record_format() {
        let prompt = job_search_prompt("any jobs").unwrap();
        for marker in ["**Title:**", "**Company:**", "**Apply:**"] {
            assert!(prompt.contains(marker));
        }
    }

    #[test]
    fn test_job_search_prompt_rejects_empty_message() {
        let err = job_search_prompt("   ").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
