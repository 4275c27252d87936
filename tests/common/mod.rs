#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use http_body_util::BodyExt;
use mealmind_relay::{
    app::build_app,
    config::AppConfig,
    gemini::{ProviderError, TextProvider},
    state::AppState,
};
use serde_json::Value;
use tower::util::ServiceExt;

pub enum Reply {
    Text(&'static str),
    Fail(fn() -> ProviderError),
}

/// Provider that replays one canned reply and records prompts.
pub struct ScriptedProvider {
    reply: Reply,
    calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn text(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Text(reply),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(make: fn() -> ProviderError) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(make),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    async fn generate(&self, prompt: &str, _mime: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Reply::Text(t) => Ok(t.to_string()),
            Reply::Fail(make) => Err(make()),
        }
    }
}

/// Router in development mode (error detail echoed).
pub fn dev_app(provider: Arc<ScriptedProvider>) -> Router {
    build_app(AppState::fake(provider))
}

/// Router in production mode (error detail suppressed).
pub fn prod_app(provider: Arc<ScriptedProvider>) -> Router {
    let config = AppConfig::from_lookup(|_| None).unwrap();
    build_app(AppState::from_parts(Arc::new(config), provider))
}

pub async fn post_json(app: Router, path: &str, body: Value) -> (u16, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn send(app: Router, req: Request<Body>) -> (u16, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status().as_u16();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
