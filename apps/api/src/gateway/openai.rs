//! OpenAI-compatible gateway — chat completions and audio transcription.
//!
//! A configurable base URL makes this cover every OpenAI-compatible
//! endpoint, not just api.openai.com.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_http_client, GatewayError, ModelGateway};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct OpenAiGateway {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    transcription_model: String,
}

impl OpenAiGateway {
    pub fn new(
        api_key: String,
        base_url: String,
        chat_model: String,
        transcription_model: String,
    ) -> Self {
        Self {
            client: build_http_client(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_model,
            transcription_model,
        }
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, GatewayError> {
        let request_body = ChatRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let text = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GatewayError::EmptyContent)?;

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(GatewayError::EmptyContent);
        }

        debug!("chat completion succeeded ({} chars)", text.len());
        Ok(text)
    }

    async fn transcribe(&self, audio: Bytes, file_name: &str) -> Result<String, GatewayError> {
        let part = Part::bytes(audio.to_vec())
            .file_name(file_name.to_string())
            .mime_str(audio_content_type(file_name))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone());

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let transcription: TranscriptionResponse = response.json().await?;

        debug!(
            "transcription succeeded ({} chars)",
            transcription.text.len()
        );
        Ok(transcription.text.trim().to_string())
    }
}

/// Content type for an uploaded audio file, keyed on its extension.
/// Unknown extensions fall back to a generic byte stream.
fn audio_content_type(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".mp3") {
        "audio/mpeg"
    } else if lower.ends_with(".wav") {
        "audio/wav"
    } else if lower.ends_with(".webm") {
        "audio/webm"
    } else if lower.ends_with(".m4a") {
        "audio/mp4"
    } else if lower.ends_with(".ogg") {
        "audio/ogg"
    } else {
        "application/octet-stream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_deserializes() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Explain database indexing."}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Explain database indexing.")
        );
    }

    #[test]
    fn test_chat_response_tolerates_null_content() {
        let json = r#"{"choices": [{"message": {"content": null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn test_transcription_response_deserializes() {
        let json = r#"{"text": "Tell me about yourself."}"#;
        let parsed: TranscriptionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text, "Tell me about yourself.");
    }

    #[test]
    fn test_api_error_body_extracts_message() {
        let json = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let parsed: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "Incorrect API key provided");
    }

    #[test]
    fn test_audio_content_type_known_extensions() {
        assert_eq!(audio_content_type("answer.mp3"), "audio/mpeg");
        assert_eq!(audio_content_type("ANSWER.WAV"), "audio/wav");
        assert_eq!(audio_content_type("clip.webm"), "audio/webm");
    }

    #[test]
    fn test_audio_content_type_unknown_extension_falls_back() {
        assert_eq!(audio_content_type("mystery.bin"), "application/octet-stream");
    }
}
