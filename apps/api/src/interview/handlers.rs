//! Axum route handlers for the mock-interview API.
//!
//! Each handler is one finite sequence: validate → build prompt → invoke
//! gateway → return. Model text passes through unshaped; evaluation and
//! feedback are opaque display strings.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::{prompts, Level};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub role: String,
    pub level: Level,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub role: String,
    pub level: Level,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluation: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub question: String,
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interview/question
///
/// Generates one interview question for a role and level.
pub async fn handle_question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, AppError> {
    let prompt = prompts::question_prompt(&request.role, request.level)?;
    let question = state
        .gateway
        .complete(&prompt, prompts::QUESTION_SYSTEM)
        .await?;
    Ok(Json(QuestionResponse { question }))
}

/// POST /api/interview/evaluate
///
/// Scores a typed answer against the question it was given for.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let prompt = prompts::evaluation_prompt(
        &request.role,
        request.level,
        &request.question,
        &request.answer,
    )?;
    let evaluation = state
        .gateway
        .complete(&prompt, prompts::EVALUATION_SYSTEM)
        .await?;
    Ok(Json(EvaluateResponse { evaluation }))
}

/// POST /api/interview/upload
///
/// Accepts a multipart audio recording of a spoken answer and returns its
/// transcript from the transcription model.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (audio, file_name) = read_audio_field(multipart).await?;
    let transcript = state.gateway.transcribe(audio, &file_name).await?;
    Ok(Json(UploadResponse { transcript }))
}

/// POST /api/interview/analyze
///
/// Produces coaching feedback for a transcribed spoken answer.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let prompt = prompts::feedback_prompt(&request.question, &request.transcript)?;
    let feedback = state
        .gateway
        .complete(&prompt, prompts::FEEDBACK_SYSTEM)
        .await?;
    Ok(Json(AnalyzeResponse { feedback }))
}

/// Pulls the audio payload out of the multipart body. Accepts the field
/// under either name the front ends have used ("file" or "audio").
async fn read_audio_field(mut multipart: Multipart) -> Result<(Bytes, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" || name == "audio" {
            let file_name = field.file_name().unwrap_or("recording.webm").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read audio field: {e}")))?;
            if data.is_empty() {
                return Err(AppError::Validation("audio file is empty".to_string()));
            }
            return Ok((data, file_name));
        }
    }
    Err(AppError::Validation(
        "'file' field with the audio recording is required".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    use super::*;
    use crate::config::Config;
    use crate::gateway::stub::StubGateway;

    fn state_with(stub: Arc<StubGateway>) -> AppState {
        AppState {
            gateway: stub,
            config: Config::for_tests(),
        }
    }

    async fn multipart_from(body: String, boundary: &str) -> Multipart {
        let request = Request::builder()
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_question_passes_model_text_through_unshaped() {
        let stub = Arc::new(StubGateway::with_reply("Explain database indexing."));
        let state = state_with(stub.clone());

        let response = handle_question(
            State(state),
            Json(QuestionRequest {
                role: "Backend Developer".to_string(),
                level: Level::Senior,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.question, "Explain database indexing.");
        assert_eq!(stub.completions(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_with_empty_answer_makes_no_gateway_call() {
        let stub = Arc::new(StubGateway::with_reply("8/10"));
        let state = state_with(stub.clone());

        let err = handle_evaluate(
            State(state),
            Json(EvaluateRequest {
                role: "Backend Developer".to_string(),
                level: Level::MidLevel,
                question: "What is an index?".to_string(),
                answer: "".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.completions(), 0);
    }

    #[tokio::test]
    async fn test_evaluate_returns_opaque_evaluation_string() {
        let stub = Arc::new(StubGateway::with_reply(
            "Score: 7/10\nGood grasp of the basics.",
        ));
        let state = state_with(stub.clone());

        let response = handle_evaluate(
            State(state),
            Json(EvaluateRequest {
                role: "Backend Developer".to_string(),
                level: Level::Junior,
                question: "What is an index?".to_string(),
                answer: "A lookup structure over table columns.".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.evaluation, "Score: 7/10\nGood grasp of the basics.");
    }

    #[tokio::test]
    async fn test_upload_transcribes_the_audio_field() {
        let boundary = "X-JOBMATE-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"answer.webm\"\r\n\
             Content-Type: audio/webm\r\n\r\n\
             fake-audio-bytes\r\n\
             --{boundary}--\r\n"
        );
        let multipart = multipart_from(body, boundary).await;

        let stub = Arc::new(StubGateway::with_reply("I would add a B-tree index."));
        let state = state_with(stub.clone());

        let response = handle_upload(State(state), multipart).await.unwrap();
        assert_eq!(response.0.transcript, "I would add a B-tree index.");
        assert_eq!(stub.transcriptions(), 1);
    }

    #[tokio::test]
    async fn test_upload_without_audio_field_is_rejected() {
        let boundary = "X-JOBMATE-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"note\"\r\n\r\n\
             not audio\r\n\
             --{boundary}--\r\n"
        );
        let multipart = multipart_from(body, boundary).await;

        let stub = Arc::new(StubGateway::with_reply("unused"));
        let state = state_with(stub.clone());

        let err = handle_upload(State(state), multipart).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.transcriptions(), 0);
    }

    #[tokio::test]
    async fn test_analyze_with_empty_question_makes_no_gateway_call() {
        let stub = Arc::new(StubGateway::with_reply("Well done."));
        let state = state_with(stub.clone());

        let err = handle_analyze(
            State(state),
            Json(AnalyzeRequest {
                question: "".to_string(),
                transcript: "I would use a hash map.".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.completions(), 0);
    }
}
