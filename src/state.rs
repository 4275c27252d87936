use crate::config::{AppConfig, AppEnv, GeminiConfig};
use crate::error::{ApiFailure, RelayError};
use crate::gemini::{GeminiClient, TextProvider};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn TextProvider>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let provider = Arc::new(GeminiClient::new(config.gemini.clone())?) as Arc<dyn TextProvider>;
        Ok(Self {
            config: Arc::new(config),
            provider,
        })
    }

    pub fn from_parts(config: Arc<AppConfig>, provider: Arc<dyn TextProvider>) -> Self {
        Self { config, provider }
    }

    /// State with development settings around the given provider.
    pub fn fake(provider: Arc<dyn TextProvider>) -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            client_origin: axum::http::HeaderValue::from_static("http://localhost:5173"),
            env: AppEnv::Development,
            gemini: GeminiConfig {
                api_key: Some("test".into()),
                model: "test-model".into(),
                base_url: "http://127.0.0.1:9".into(),
                timeout: None,
            },
        });
        Self { config, provider }
    }

    /// Wraps a route error, logging it once.
    pub fn fail(&self, public_message: &'static str, error: RelayError) -> ApiFailure {
        ApiFailure::new(public_message, error, self.config.expose_error_details())
    }
}
