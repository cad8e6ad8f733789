use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use guia_common::{GuiaError, ReviewInput};
use guia_store::Review;
use tracing::{info, warn};

use super::{error_response, guia_error_response};
use crate::AppState;

pub async fn api_submit_review(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReviewInput>,
) -> impl IntoResponse {
    if let Err(e) = body.validate() {
        return guia_error_response(e);
    }

    match Review::create(&body, &state.pool).await {
        Ok(Some(review)) => {
            info!(review_id = %review.id, venue_id = %review.venue_id, rating = review.rating, "Review submitted");
            Json(serde_json::json!({
                "message": "Review submitted successfully",
                "reviewId": review.id,
            }))
            .into_response()
        }
        Ok(None) => guia_error_response(GuiaError::NotFound(format!("venue {}", body.venue_id))),
        Err(e) => {
            warn!(error = %e, venue_id = %body.venue_id, "Failed to store review");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store review")
        }
    }
}
