use std::collections::{HashMap, VecDeque};

use ai_client::Message;
use tokio::sync::Mutex;

pub const DEFAULT_SESSION: &str = "default";

/// Per-session rolling chat history. Each session keeps at most `limit`
/// user/assistant messages; the oldest are dropped first.
///
/// Sessions are never evicted. Websocket sessions are cleared when the socket
/// closes; HTTP sessions live until `DELETE /api/chat/history` or restart.
pub struct SessionStore {
    limit: usize,
    sessions: Mutex<HashMap<String, VecDeque<Message>>>,
}

impl SessionStore {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn history(&self, session: &str) -> Vec<Message> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Append one completed exchange.
    pub async fn record_turn(&self, session: &str, user: Message, assistant: Message) {
        let mut sessions = self.sessions.lock().await;
        let history = sessions.entry(session.to_string()).or_default();
        history.push_back(user);
        history.push_back(assistant);
        while history.len() > self.limit {
            history.pop_front();
        }
    }

    /// Forget one session. Returns whether it existed.
    pub async fn clear(&self, session: &str) -> bool {
        self.sessions.lock().await.remove(session).is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
