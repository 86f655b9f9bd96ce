//! Google Gemini gateway — the alternate text-generation provider.
//!
//! Transcription is not offered by this API surface, so `transcribe`
//! reports the operation as unsupported.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_http_client, GatewayError, ModelGateway};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub struct GeminiGateway {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiGateway {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: build_http_client(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, GatewayError> {
        let request_body = GenerateRequest {
            system_instruction: Content {
                parts: vec![TextPart { text: system }],
            },
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_URL}/{}:generateContent", self.model);

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        let text = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or(GatewayError::EmptyContent)?;

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(GatewayError::EmptyContent);
        }

        debug!("generateContent succeeded ({} chars)", text.len());
        Ok(text)
    }

    async fn transcribe(&self, _audio: Bytes, _file_name: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Unsupported {
            operation: "audio transcription",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response_deserializes() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "What is a closure?"}], "role": "model"}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.candidates[0].content.parts[0].text.as_deref(),
            Some("What is a closure?")
        );
    }

    #[test]
    fn test_generate_response_tolerates_missing_text() {
        let json = r#"{"candidates": [{"content": {"parts": [{}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.candidates[0].content.parts[0].text.is_none());
    }

    #[tokio::test]
    async fn test_transcribe_is_unsupported() {
        let gateway = GeminiGateway::new("key".to_string(), "gemini-1.5-flash".to_string());
        let err = gateway
            .transcribe(Bytes::from_static(b"audio"), "a.wav")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unsupported { .. }));
    }
}
