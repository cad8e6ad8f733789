use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use guia_common::{GuiaError, ImportSummary, Page, VenueFilters};
use guia_store::VenueView;
use places_client::{PlacesClient, PlacesError, DEFAULT_QUERIES};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::{error_response, guia_error_response};
use crate::import::import_candidates;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuesQuery {
    zone: Option<String>,
    category: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

pub async fn api_venues(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VenuesQuery>,
) -> impl IntoResponse {
    let filters = VenueFilters {
        zone: params.zone,
        category: params.category,
    }
    .normalized();
    let page = Page::new(params.page, params.page_size);

    match VenueView::list_active(&filters, page, &state.pool).await {
        Ok(venues) => Json(venues).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to list venues");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to list venues")
        }
    }
}

pub async fn api_venue_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match VenueView::find_active(id, &state.pool).await {
        Ok(Some(venue)) => Json(venue).into_response(),
        Ok(None) => guia_error_response(GuiaError::NotFound(format!("venue {id}"))),
        Err(e) => {
            warn!(error = %e, %id, "Failed to load venue");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load venue")
        }
    }
}

pub async fn api_import_places(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match import_places(&state).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => {
            warn!(error = %e, "Places import failed");
            guia_error_response(e)
        }
    }
}

async fn import_places(state: &AppState) -> Result<ImportSummary, GuiaError> {
    let key = state.places_api_key.as_deref().unwrap_or_default();
    let client = PlacesClient::new(key).map_err(places_error)?;

    info!("Starting places import");
    let candidates = client
        .search_city_venues(DEFAULT_QUERIES)
        .await
        .map_err(places_error)?;

    Ok(import_candidates(candidates, &*state.assigner, &state.pool).await?)
}

fn places_error(err: PlacesError) -> GuiaError {
    match err {
        PlacesError::MissingApiKey => GuiaError::Config(err.to_string()),
        other => GuiaError::Upstream(other.to_string()),
    }
}
