//! Axum route handler for the resume checker.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::resume::analysis::{parse_analysis, ResumeAnalysis};
use crate::resume::prompts::{self, AnalysisType};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub analysis: ResumeAnalysis,
}

/// Multipart form fields of the check endpoint.
#[derive(Debug, Default)]
struct CheckForm {
    file: Option<(Bytes, String)>,
    position: Option<String>,
    description: Option<String>,
    analysis_type: Option<String>,
}

/// POST /api/resume/check
///
/// Multipart form: `file` (PDF or plain text), `position`, optional
/// `description`, optional `analysis_type` ("summary" default, or
/// "percentage").
pub async fn handle_check(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CheckResponse>, AppError> {
    let form = read_check_form(multipart).await?;

    let (data, file_name) = form
        .file
        .ok_or_else(|| AppError::Validation("'file' with the resume is required".to_string()))?;
    let position = form
        .position
        .ok_or_else(|| AppError::Validation("'position' is required".to_string()))?;
    let analysis_type = match form.analysis_type {
        Some(value) => AnalysisType::parse(&value)?,
        None => AnalysisType::default(),
    };

    let resume_text = extract_resume_text(&data, &file_name)?;
    debug!(
        "resume '{}' extracted: {} chars",
        file_name,
        resume_text.len()
    );

    let analysis = analyze_resume(
        &state,
        analysis_type,
        &resume_text,
        &position,
        form.description.as_deref(),
    )
    .await?;

    Ok(Json(CheckResponse { analysis }))
}

/// Core check sequence: build prompt → invoke gateway → shape. Split out
/// from the multipart plumbing so it can be exercised directly.
async fn analyze_resume(
    state: &AppState,
    analysis_type: AnalysisType,
    resume_text: &str,
    position: &str,
    description: Option<&str>,
) -> Result<ResumeAnalysis, AppError> {
    let prompt = prompts::resume_prompt(analysis_type, resume_text, position, description)?;
    let raw = state
        .gateway
        .complete(&prompt, prompts::system_for(analysis_type))
        .await?;
    Ok(parse_analysis(&raw))
}

async fn read_check_form(mut multipart: Multipart) -> Result<CheckForm, AppError> {
    let mut form = CheckForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("failed to read resume file: {e}"))
                })?;
                form.file = Some((data, file_name));
            }
            "position" => form.position = Some(text_field(field).await?),
            "description" => form.description = Some(text_field(field).await?),
            "analysis_type" => form.analysis_type = Some(text_field(field).await?),
            _ => {}
        }
    }
    Ok(form)
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid form field: {e}")))
}

/// Text of the uploaded resume: PDF files go through text extraction,
/// anything else must already be UTF-8 text.
fn extract_resume_text(data: &Bytes, file_name: &str) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("resume file is empty".to_string()));
    }
    if file_name.to_lowercase().ends_with(".pdf") {
        return pdf_extract::extract_text_from_mem(data.as_ref()).map_err(|e| {
            AppError::Validation(format!("could not extract text from PDF: {e}"))
        });
    }
    String::from_utf8(data.to_vec()).map_err(|_| {
        AppError::Validation(
            "unsupported file format: expected a PDF or a plain-text resume".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::gateway::stub::StubGateway;

    fn state_with(stub: Arc<StubGateway>) -> AppState {
        AppState {
            gateway: stub,
            config: Config::for_tests(),
        }
    }

    #[tokio::test]
    async fn test_analyze_resume_shapes_json_reply() {
        let stub = Arc::new(StubGateway::with_reply(
            r#"{"match_percentage": "82%", "missing_keywords": ["Go"], "profile_summary": "Strong."}"#,
        ));
        let state = state_with(stub.clone());

        let analysis = analyze_resume(
            &state,
            AnalysisType::Percentage,
            "Rust engineer with 8 years of experience.",
            "Backend Engineer",
            None,
        )
        .await
        .unwrap();

        assert_eq!(analysis.match_percentage, "82%");
        assert_eq!(analysis.missing_keywords, vec!["Go"]);
        assert_eq!(analysis.profile_summary, "Strong.");
        assert_eq!(stub.completions(), 1);
    }

    #[tokio::test]
    async fn test_analyze_resume_never_fails_on_prose_reply() {
        let stub = Arc::new(StubGateway::with_reply(
            "The candidate looks like a reasonable fit overall.",
        ));
        let state = state_with(stub);

        let analysis = analyze_resume(
            &state,
            AnalysisType::Summary,
            "Some resume text.",
            "Product Manager",
            Some("Owns the roadmap."),
        )
        .await
        .unwrap();

        assert_eq!(analysis.match_percentage, "N/A");
        assert_eq!(
            analysis.profile_summary,
            "The candidate looks like a reasonable fit overall."
        );
    }

    #[tokio::test]
    async fn test_empty_position_makes_no_gateway_call() {
        let stub = Arc::new(StubGateway::with_reply("unused"));
        let state = state_with(stub.clone());

        let err = analyze_resume(&state, AnalysisType::Summary, "resume text", "", None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.completions(), 0);
    }

    #[test]
    fn test_extract_resume_text_accepts_plain_text() {
        let data = Bytes::from_static(b"Jane Doe\nRust Engineer");
        let text = extract_resume_text(&data, "resume.txt").unwrap();
        assert!(text.contains("Jane Doe"));
    }

    #[test]
    fn test_extract_resume_text_rejects_empty_file() {
        let err = extract_resume_text(&Bytes::new(), "resume.pdf").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_extract_resume_text_rejects_binary_non_pdf() {
        let data = Bytes::from_static(&[0xff, 0xfe, 0x00, 0x01]);
        let err = extract_resume_text(&data, "resume.docx").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
