use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use guia_store::{database_status, reset_database, Venue, ZoneRecord};
use guia_zones::ZoneDistribution;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::error_response;
use crate::AppState;

pub async fn api_reset_database(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match reset_database(&state.pool).await {
        Ok(summary) => Json(json!({
            "message": "Database reset",
            "deleted": summary,
        }))
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to reset database");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to reset database")
        }
    }
}

pub async fn api_initialize_zones(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.assigner.catalog();
    let result = async {
        let created = ZoneRecord::create_many(catalog, &state.pool).await?;
        let zones = ZoneRecord::list(&state.pool).await?;
        anyhow::Ok((created, zones))
    }
    .await;

    match result {
        Ok((created, zones)) => {
            info!(created, total = zones.len(), "Zones initialized");
            Json(json!({
                "message": "Zones initialized",
                "created": created,
                "zones": zones,
            }))
            .into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to initialize zones");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to initialize zones")
        }
    }
}

pub async fn api_database_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match database_status(&state.pool).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to read database status");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read database status")
        }
    }
}

pub async fn api_zone_distribution(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match Venue::all_active(&state.pool).await {
        Ok(venues) => Json(state.assigner.zone_distribution(&venues)).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to load venues for distribution");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to compute zone distribution")
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignZonesResponse {
    total: usize,
    assigned: usize,
    updated: usize,
    distribution: ZoneDistribution,
}

/// Recompute every active venue's zone from its coordinates and store it.
pub async fn api_assign_zones(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result = async {
        let mut venues = Venue::all_active(&state.pool).await?;
        let assignments = state.assigner.assign_all(&venues);
        let assigned = assignments.iter().filter(|a| a.is_assigned()).count();

        let labels: Vec<_> = venues
            .iter_mut()
            .zip(&assignments)
            .map(|(venue, assignment)| {
                venue.zone = Some(assignment.label().to_string());
                (venue.id, assignment.label().to_string())
            })
            .collect();
        let updated = Venue::update_zones(&labels, &state.pool).await?;

        anyhow::Ok(AssignZonesResponse {
            total: venues.len(),
            assigned,
            updated,
            distribution: state.assigner.zone_distribution(&venues),
        })
    }
    .await;

    match result {
        Ok(response) => {
            info!(total = response.total, assigned = response.assigned, "Zones reassigned");
            Json(response).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to assign zones");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to assign zones")
        }
    }
}
