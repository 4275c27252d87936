use mealmind_relay::{app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mealmind_relay=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; AI routes will fail until it is configured");
    }
    tracing::info!(env = ?config.env, origin = ?config.client_origin, model = %config.gemini.model, "config loaded");

    let (host, port) = (config.host.clone(), config.port);
    let state = AppState::init(config)?;
    app::serve(app::build_app(state), &host, port).await
}
