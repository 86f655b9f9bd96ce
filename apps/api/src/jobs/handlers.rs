//! Axum route handler for the job-chat API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::listing::{parse_listing, split_listing_blocks, JobListing};
use crate::jobs::prompts;
use crate::state::AppState;

/// Messages containing one of these are treated as job queries; everything
/// else gets the canned guidance reply.
const JOB_KEYWORDS: &[&str] = &[
    "job",
    "jobs",
    "position",
    "role",
    "work",
    "career",
    "hire",
    "hiring",
    "find",
    "search",
    "looking for",
];

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat reply payload: either a plain text message or an ordered array of
/// listing-text blocks. The array form is what triggers progressive reveal
/// on the consumer side.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatPayload {
    Text(String),
    Listings(Vec<String>),
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: ChatPayload,
    /// Structured records parsed from the listing blocks, in the same order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listings: Vec<JobListing>,
    /// Nudge towards the resume checker when the message mentions resumes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Reveal cadence for the listings array, so the consumer drains the
    /// queue at the server-configured pace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal_delay_ms: Option<u64>,
}

/// POST /api/chat
///
/// Job-query messages go through the model and come back as listing-text
/// blocks; anything else gets the guidance reply without a model call.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("'message' is required".to_string()));
    }

    let recommendation = resume_checker_recommendation(message);

    if !is_job_query(message) {
        return Ok(Json(ChatResponse {
            success: true,
            kind: "response",
            message: ChatPayload::Text(prompts::GUIDANCE_MESSAGE.to_string()),
            listings: Vec::new(),
            recommendation,
            reveal_delay_ms: None,
        }));
    }

    let prompt = prompts::job_search_prompt(message)?;
    let raw = state
        .gateway
        .complete(&prompt, prompts::JOB_SEARCH_SYSTEM)
        .await?;

    let blocks = split_listing_blocks(&raw);
    if blocks.is_empty() {
        // The model answered in prose; pass it through as-is.
        return Ok(Json(ChatResponse {
            success: true,
            kind: "response",
            message: ChatPayload::Text(raw),
            listings: Vec::new(),
            recommendation,
            reveal_delay_ms: None,
        }));
    }

    let listings = blocks.iter().map(|block| parse_listing(block)).collect();

    Ok(Json(ChatResponse {
        success: true,
        kind: "job_results",
        message: ChatPayload::Listings(blocks),
        listings,
        recommendation,
        reveal_delay_ms: Some(state.config.reveal_delay_ms),
    }))
}

fn is_job_query(message: &str) -> bool {
    let lower = message.to_lowercase();
    JOB_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Recommendation shown when the message is about resumes or CVs.
fn resume_checker_recommendation(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    let mentions_cv = lower.contains("resume")
        || lower.contains("cv")
        || lower.contains("checker")
        || lower.contains("curriculum vitae");
    mentions_cv.then(|| {
        "If you want to check or improve your resume, try the Resume Checker option!".to_string()
    })
}
