pub mod admin;
pub mod chat;
pub mod rankings;
pub mod reviews;
pub mod venues;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use guia_common::GuiaError;
use serde_json::json;

pub const BANNER: &str = "Guía Gastronómica de Huelva API";

pub async fn banner() -> &'static str {
    BANNER
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
    }))
}

pub(crate) fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (status, Json(json!({"error": message.to_string()}))).into_response()
}

pub(crate) fn status_for(err: &GuiaError) -> StatusCode {
    match err {
        GuiaError::NotFound(_) => StatusCode::NOT_FOUND,
        GuiaError::Validation(_) | GuiaError::Config(_) => StatusCode::BAD_REQUEST,
        GuiaError::Upstream(_) => StatusCode::BAD_GATEWAY,
        GuiaError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn guia_error_response(err: GuiaError) -> Response {
    error_response(status_for(&err), err)
}
