//! Outbound calls to the Gemini `generateContent` endpoint.

mod client;
mod dto;
mod fence;

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

pub use client::GeminiClient;
pub use fence::strip_code_fences;

pub const JSON_MIME: &str = "application/json";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API Key not configured on server")]
    NotConfigured,

    #[error("network error calling Gemini: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Gemini API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("failed to decode Gemini response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid response from AI")]
    InvalidResponse,
}

/// One-shot text generation. Implementations return the fence-stripped text.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, prompt: &str, response_mime_type: &str)
        -> Result<String, ProviderError>;
}
