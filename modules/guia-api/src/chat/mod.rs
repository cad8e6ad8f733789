//! Venue-grounded chat assistant backed by a local language model.

pub mod context;
pub mod intent;
pub mod session;

use std::collections::BTreeMap;
use std::sync::Arc;

use ai_client::{LanguageModel, Message};
use anyhow::Result;
use async_trait::async_trait;
use guia_common::ChatReply;
use guia_store::VenueView;
use guia_zones::ZoneCatalog;
use sqlx::PgPool;
use tracing::{info, warn};

use context::system_message;
use intent::{extract_intent, mentioned_zone, zone_keywords};
use session::SessionStore;

pub use session::DEFAULT_SESSION;

/// How many venues ground each answer.
pub const CONTEXT_VENUES: i64 = 5;

pub const EMPTY_REPLY: &str = "Lo siento, no pude generar una respuesta.";
pub const GREETING: &str =
    "¡Hola! Soy tu asistente de gastronomía en Huelva. ¿En qué puedo ayudarte hoy?";

/// Source of the venues used to ground a reply.
#[async_trait]
pub trait VenueLookup: Send + Sync {
    /// Best active venues by score, limited to zones containing `zone_keyword`.
    async fn top_venues(&self, zone_keyword: Option<&str>, limit: i64) -> Result<Vec<VenueView>>;
}

pub struct PgVenueLookup {
    pool: PgPool,
}

impl PgVenueLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueLookup for PgVenueLookup {
    async fn top_venues(&self, zone_keyword: Option<&str>, limit: i64) -> Result<Vec<VenueView>> {
        VenueView::top_matching_zone(zone_keyword, limit, &self.pool).await
    }
}

pub struct ChatAssistant {
    model: Arc<dyn LanguageModel>,
    venues: Arc<dyn VenueLookup>,
    sessions: SessionStore,
    zone_keywords: Vec<String>,
}

impl ChatAssistant {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        venues: Arc<dyn VenueLookup>,
        catalog: &ZoneCatalog,
        history_limit: usize,
    ) -> Self {
        Self {
            model,
            venues,
            sessions: SessionStore::new(history_limit),
            zone_keywords: zone_keywords(catalog),
        }
    }

    /// Answer one message. Failures become an `"Error: …"` reply and leave the
    /// session history untouched.
    pub async fn process_message(&self, session: &str, text: &str) -> ChatReply {
        info!(session, chars = text.chars().count(), "Processing chat message");

        let extracted_intent = extract_intent(text);
        match self.respond(session, text).await {
            Ok((response, venues)) => {
                let mut extracted_entities = BTreeMap::new();
                extracted_entities.insert(
                    "venues_context".to_string(),
                    serde_json::to_value(&venues).unwrap_or_default(),
                );
                ChatReply {
                    response,
                    extracted_intent,
                    extracted_entities,
                }
            }
            Err(e) => {
                warn!(error = %e, session, "Chat turn failed");
                ChatReply::error(e)
            }
        }
    }

    async fn respond(&self, session: &str, text: &str) -> Result<(String, Vec<VenueView>)> {
        let zone = mentioned_zone(text, &self.zone_keywords);
        let venues = self.venues.top_venues(zone, CONTEXT_VENUES).await?;

        let mut messages = vec![Message::system(system_message(&venues))];
        messages.extend(self.sessions.history(session).await);
        messages.push(Message::user(text));

        let reply = self.model.chat(&messages).await?;
        let reply = match reply.trim() {
            "" => EMPTY_REPLY.to_string(),
            trimmed => trimmed.to_string(),
        };

        self.sessions
            .record_turn(session, Message::user(text), Message::assistant(reply.as_str()))
            .await;

        Ok((reply, venues))
    }

    /// Forget a session's history. Returns whether there was any.
    pub async fn clear_history(&self, session: &str) -> bool {
        self.sessions.clear(session).await
    }
}
