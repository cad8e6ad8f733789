use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use guia_store::Ranking;
use serde::Deserialize;
use tracing::warn;

use super::error_response;
use crate::AppState;

#[derive(Deserialize)]
pub struct RankingQuery {
    top: Option<i64>,
}

pub async fn api_rankings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RankingQuery>,
) -> impl IntoResponse {
    match Ranking::compute(params.top, &state.pool).await {
        Ok(ranking) => Json(ranking).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to compute rankings");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to compute rankings")
        }
    }
}
