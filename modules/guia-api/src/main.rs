use std::sync::Arc;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ai_client::Ollama;
use guia_api::chat::{ChatAssistant, PgVenueLookup};
use guia_api::{build_router, AppState};
use guia_common::Config;
use guia_zones::{ZoneAssigner, ZoneCatalog};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting guia-api");

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    guia_store::run_migrations(&pool).await?;
    info!("Migrations complete");

    let catalog = Arc::new(ZoneCatalog::from_profile(config.zone_profile));
    let assigner = Arc::new(ZoneAssigner::new(catalog.clone(), config.zone_radius_km));
    info!(
        profile = %config.zone_profile,
        zones = catalog.len(),
        radius_km = config.zone_radius_km,
        "Zone catalog loaded"
    );

    let ollama = Ollama::new(&config.ollama_url, &config.ollama_model)?;
    match ollama.has_model().await {
        Ok(true) => info!(model = %config.ollama_model, "Language model available"),
        Ok(false) => warn!(model = %config.ollama_model, "Language model not installed on Ollama server"),
        Err(e) => warn!(error = %e, url = %config.ollama_url, "Ollama server unreachable"),
    }

    let chat = ChatAssistant::new(
        Arc::new(ollama),
        Arc::new(PgVenueLookup::new(pool.clone())),
        &catalog,
        config.chat_history_limit,
    );

    if config.google_places_api_key.is_none() {
        warn!("GOOGLE_PLACES_API_KEY not set, places import disabled");
    }

    let state = Arc::new(AppState {
        pool,
        assigner,
        chat,
        places_api_key: config.google_places_api_key.clone(),
    });

    let app = build_router(state, &config.allowed_origins);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("guia-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
