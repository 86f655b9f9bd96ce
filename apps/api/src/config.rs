use anyhow::{bail, Context, Result};

/// Which model provider backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// OpenAI or any OpenAI-compatible endpoint (selected via `LLM_BASE_URL`).
    OpenAi,
    /// Google Gemini `generateContent` API.
    Gemini,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Cadence of the progressive job-listing reveal, in milliseconds.
    pub reveal_delay_ms: u64,
}

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
const DEFAULT_REVEAL_DELAY_MS: u64 = 1200;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = match std::env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "openai".to_string())
            .to_lowercase()
            .as_str()
        {
            "openai" => Provider::OpenAi,
            "gemini" => Provider::Gemini,
            other => bail!("Unknown LLM_PROVIDER '{other}' (expected 'openai' or 'gemini')"),
        };

        Ok(Config {
            provider,
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_base_url: std::env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            chat_model: std::env::var("CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            transcription_model: std::env::var("TRANSCRIPTION_MODEL")
                .unwrap_or_else(|_| DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            reveal_delay_ms: std::env::var("REVEAL_DELAY_MS")
                .unwrap_or_else(|_| DEFAULT_REVEAL_DELAY_MS.to_string())
                .parse::<u64>()
                .context("REVEAL_DELAY_MS must be a non-negative integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    /// Config fixture for handler tests; no environment access.
    pub fn for_tests() -> Self {
        Config {
            provider: Provider::OpenAi,
            llm_api_key: "test-key".to_string(),
            llm_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
            port: 0,
            rust_log: "info".to_string(),
            reveal_delay_ms: 100,
        }
    }
}
