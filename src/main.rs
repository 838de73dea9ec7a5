mod catalog;
mod config;
mod error;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::RelayConfig::from_env().expect("invalid relay configuration");
    let catalog = catalog::Catalog::load(config.catalog_path.as_deref()).expect("bug catalog load failed");
    let with_resolution = catalog.records().iter().filter(|r| r.resolution.is_some()).count();
    tracing::info!(
        records = catalog.len(),
        with_resolution,
        prompt_bytes = catalog.serialized().len(),
        "bug catalog loaded"
    );
    if catalog.is_empty() {
        tracing::warn!("bug catalog is empty; answers will have no bug data to draw on");
    }

    std::fs::create_dir_all(&config.upload_dir).expect("failed to create upload directory");

    let ai = llm::GeminiClient::from_env().expect("AI client configuration failed");
    tracing::info!(model = ai.model(), "AI client initialized");

    let port = config.port;
    let state = state::AppState::new(Arc::new(ai), catalog, config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "bugrelay listening");
    axum::serve(listener, app).await.expect("server failed");
}
