use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use guia_common::ChatMessageInput;
use serde::Deserialize;

use super::error_response;
use crate::chat::DEFAULT_SESSION;
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    session_id: Option<String>,
}

fn session_or_default(session: Option<&str>) -> &str {
    session
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SESSION)
}

pub async fn api_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatMessageInput>,
) -> impl IntoResponse {
    let message = body.message.trim();
    if message.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Message is empty");
    }

    let session = session_or_default(body.session_id.as_deref());
    let reply = state.chat.process_message(session, message).await;
    Json(reply).into_response()
}

pub async fn api_clear_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SessionQuery>,
) -> impl IntoResponse {
    let session = session_or_default(params.session_id.as_deref());
    let existed = state.chat.clear_history(session).await;
    Json(serde_json::json!({
        "message": "Chat history cleared",
        "hadHistory": existed,
    }))
}
