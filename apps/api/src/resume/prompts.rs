//! Prompt builders for the resume checker.
//!
//! Two variants: an HR-style narrative evaluation ("summary") and an
//! ATS-style match report ("percentage"). The percentage variant asks for
//! JSON, but the shaper in `analysis.rs` tolerates whatever comes back.

use serde::Deserialize;

use crate::errors::AppError;

/// Which analysis the caller wants. Wire form is lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    Summary,
    Percentage,
}

impl AnalysisType {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "summary" => Ok(AnalysisType::Summary),
            "percentage" => Ok(AnalysisType::Percentage),
            other => Err(AppError::Validation(format!(
                "unknown analysis_type '{other}' (expected 'summary' or 'percentage')"
            ))),
        }
    }
}

const SUMMARY_SYSTEM: &str = "You are an experienced Technical Human Resource Manager \
    reviewing candidate resumes against job requirements.";

const PERCENTAGE_SYSTEM: &str = "You are a skilled ATS (Applicant Tracking System) scanner \
    with a deep understanding of technical hiring and ATS functionality.";

/// Returns the system prompt matching the analysis variant.
pub fn system_for(analysis_type: AnalysisType) -> &'static str {
    match analysis_type {
        AnalysisType::Summary => SUMMARY_SYSTEM,
        AnalysisType::Percentage => PERCENTAGE_SYSTEM,
    }
}

const SUMMARY_PROMPT_TEMPLATE: &str = r#"Review the provided resume against the target position.
Share your professional evaluation on whether the candidate's profile aligns with the role.
Highlight the strengths and weaknesses of the applicant in relation to the specified requirements.

Target position: {position}
Job description: {description}

Resume:
{resume}"#;

const PERCENTAGE_PROMPT_TEMPLATE: &str = r#"Evaluate the resume against the target position and job description.

Respond with a JSON object in this exact shape:
{"match_percentage": "75%", "missing_keywords": ["keyword1", "keyword2"], "profile_summary": "final thoughts here"}

If you cannot produce JSON, output the match percentage first, then the missing
keywords on a line starting with "Missing Keywords:", and last your final thoughts.

Target position: {position}
Job description: {description}

Resume:
{resume}"#;

/// Builds the resume-analysis prompt. The job description is optional;
/// resume text and target position are required.
pub fn resume_prompt(
    analysis_type: AnalysisType,
    resume_text: &str,
    position: &str,
    description: Option<&str>,
) -> Result<String, AppError> {
    let resume_text = resume_text.trim();
    if resume_text.is_empty() {
        return Err(AppError::Validation(
            "resume text is required (the uploaded file was empty)".to_string(),
        ));
    }
    let position = position.trim();
    if position.is_empty() {
        return Err(AppError::Validation("'position' is required".to_string()));
    }
    let description = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("(not provided)");

    let template = match analysis_type {
        AnalysisType::Summary => SUMMARY_PROMPT_TEMPLATE,
        AnalysisType::Percentage => PERCENTAGE_PROMPT_TEMPLATE,
    };
    Ok(template
        .replace("{position}", position)
        .replace("{description}", description)
        .replace("{resume}", resume_text))
}
