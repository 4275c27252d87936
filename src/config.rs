use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub client_origin: HeaderValue,
    pub env: AppEnv,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {v}"))?,
            None => 3000,
        };

        let origin = var("CLIENT_URL").unwrap_or_else(|| "http://localhost:5173".into());
        // CORS credentials cannot be combined with a wildcard origin.
        anyhow::ensure!(
            origin.trim() != "*",
            "CLIENT_URL must name a single origin, \"*\" is not allowed with credentials"
        );
        let client_origin = HeaderValue::from_str(origin.trim())
            .with_context(|| format!("CLIENT_URL is not a valid origin: {origin}"))?;

        let env = match var("APP_ENV").or_else(|| var("NODE_ENV")) {
            Some(v) if v.eq_ignore_ascii_case("development") => AppEnv::Development,
            _ => AppEnv::Production,
        };

        let timeout = match var("GEMINI_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(
                v.trim()
                    .parse::<u64>()
                    .with_context(|| format!("GEMINI_TIMEOUT_SECS is not a number: {v}"))?,
            )),
            None => None,
        };

        let gemini = GeminiConfig {
            api_key: var("GEMINI_API_KEY").or_else(|| var("VITE_GEMINI_API_KEY")),
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            base_url: var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into())
                .trim_end_matches('/')
                .to_string(),
            timeout,
        };

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            client_origin,
            env,
            gemini,
        })
    }

    /// Whether 5xx responses carry the underlying error message.
    pub fn expose_error_details(&self) -> bool {
        self.env == AppEnv::Development
    }
}
