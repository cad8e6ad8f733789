//! HTTP and websocket surface of the venue directory.

pub mod chat;
pub mod import;
pub mod rest;
pub mod ws;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use guia_zones::ZoneAssigner;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chat::ChatAssistant;

pub struct AppState {
    pub pool: PgPool,
    pub assigner: Arc<ZoneAssigner>,
    pub chat: ChatAssistant,
    pub places_api_key: Option<String>,
}

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(rest::banner))
        .route("/health", get(rest::health))
        // Venues
        .route("/api/venues", get(rest::venues::api_venues))
        .route("/api/venues/{id}", get(rest::venues::api_venue_detail))
        .route(
            "/api/venues/import-from-google-places",
            post(rest::venues::api_import_places),
        )
        // Reviews and rankings
        .route("/api/reviews", post(rest::reviews::api_submit_review))
        .route("/api/rankings", get(rest::rankings::api_rankings))
        // Chat
        .route("/api/chat", post(rest::chat::api_chat))
        .route("/api/chat/history", delete(rest::chat::api_clear_history))
        .route("/ws/chat", get(ws::chat_socket))
        // Admin
        .route("/api/admin/reset-database", post(rest::admin::api_reset_database))
        .route("/api/admin/initialize-zones", post(rest::admin::api_initialize_zones))
        .route("/api/admin/database-status", get(rest::admin::api_database_status))
        .route("/api/admin/zone-distribution", get(rest::admin::api_zone_distribution))
        .route("/api/admin/assign-zones", post(rest::admin::api_assign_zones))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}
