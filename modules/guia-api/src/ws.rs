use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat::GREETING;
use crate::AppState;

pub async fn chat_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One chat session per connection. Every text frame gets the assistant's
/// reply text back.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let session = Uuid::new_v4().to_string();
    info!(%session, "Chat client connected");

    if socket.send(Message::Text(GREETING.into())).await.is_err() {
        return;
    }

    while let Some(Ok(frame)) = socket.recv().await {
        match frame {
            Message::Text(text) => {
                let text = text.as_str().trim();
                if text.is_empty() {
                    continue;
                }
                let reply = state.chat.process_message(&session, text).await;
                if socket.send(Message::Text(reply.response.into())).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            other => debug!(?other, "Ignoring non-text frame"),
        }
    }

    state.chat.clear_history(&session).await;
    info!(%session, "Chat client disconnected");
}
