/// Model Gateway — the single point of entry for all external model calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All model interactions MUST go through an implementation of `ModelGateway`.
///
/// Every invocation issues exactly one outbound call: no retry, no backoff,
/// no caching. A failed call carries no partial result; the handler decides
/// what to surface to the user.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;

pub mod gemini;
pub mod openai;

pub use gemini::GeminiGateway;
pub use openai::OpenAiGateway;

/// The external model may take up to a minute to answer a single prompt,
/// so the request timeout is deliberately generous.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,

    #[error("{operation} is not supported by this provider")]
    Unsupported { operation: &'static str },
}

/// The model gateway trait. Implement this to swap providers without
/// touching the endpoint, handler, or prompt code.
///
/// Carried in `AppState` as `Arc<dyn ModelGateway>`.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends one chat-completion request and returns the trimmed model text.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, GatewayError>;

    /// Sends one transcription request for an uploaded audio payload and
    /// returns the transcript text.
    async fn transcribe(&self, audio: Bytes, file_name: &str) -> Result<String, GatewayError>;
}

pub(crate) fn build_http_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
}
