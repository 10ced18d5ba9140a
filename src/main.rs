use protohush::api::{self, app_state::AppState};
use protohush::config::loader::ConfigLoader;
use protohush::ingestion::{TakeoutImporter, resolve_dir, serve_after_import};
use protohush::llm::create_language_model;
use protohush::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing,
};
use protohush::services::create_chat_service;
use protohush::storage::create_social_store;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;
    let _log_guard = init_tracing(&config.logging)?;
    info!(environment = %config.environment, "Configuration loaded successfully");

    let store = create_social_store(&config.storage).await?;
    info!(backend = %config.storage.backend, "Social store initialized");

    // Import mode: load a takeout export into the store. A persistent backend
    // exits afterwards; the memory backend keeps serving the imported data.
    if let Ok(target) = std::env::var("PROTOHUSH_IMPORT") {
        let mut ingestion = config.ingestion.clone();
        ingestion.takeout_dir = resolve_dir(&config.ingestion, Some(&target));

        let summary = TakeoutImporter::new(store.clone(), ingestion)
            .import_dir()
            .await?;
        info!(
            followers = summary.followers,
            followings = summary.followings,
            likes = summary.likes,
            "Import complete"
        );
        if !serve_after_import(&config.storage.backend) {
            return Ok(());
        }
        info!("Memory backend in use, serving imported data");
    }

    let model = create_language_model(&config.llm)?;
    info!(model = %config.llm.model, "Language model client initialized");

    let chat_service = create_chat_service(model, store, &config.dispatch);
    info!("Chat service initialized");

    let metrics = Arc::new(AppMetrics::default());
    let app_state = AppState::new(
        chat_service,
        metrics.clone(),
        Duration::from_secs(config.server.request_timeout),
    );

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        config.storage.backend.clone(),
        metrics,
    ));
    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
