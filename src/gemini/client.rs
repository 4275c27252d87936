use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, instrument};

use super::dto::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use super::{strip_code_fences, ProviderError, TextProvider};
use crate::config::GeminiConfig;

const FALLBACK_API_ERROR: &str = "Failed to call Gemini API";

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl TextProvider for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        response_mime_type: &str,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured)?;

        let body = GenerateContentRequest::single_prompt(prompt, response_mime_type);
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let envelope = response
                .json::<ApiErrorEnvelope>()
                .await
                .unwrap_or_default();
            let message = envelope
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| FALLBACK_API_ERROR.to_string());
            error!(%status, %message, "gemini returned an error");
            return Err(ProviderError::Api { status, message });
        }

        let data: GenerateContentResponse =
            response.json().await.map_err(ProviderError::Decode)?;
        let text = data.first_text().ok_or(ProviderError::InvalidResponse)?;
        debug!(raw_len = text.len(), "gemini text received");

        Ok(strip_code_fences(&text))
    }
}
