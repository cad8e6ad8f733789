use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GuiaError;

// --- Listing ---

/// Optional exact-match filters for venue listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueFilters {
    pub zone: Option<String>,
    pub category: Option<String>,
}

impl VenueFilters {
    /// Empty strings mean "no filter".
    pub fn normalized(self) -> Self {
        Self {
            zone: self.zone.filter(|z| !z.trim().is_empty()),
            category: self.category.filter(|c| !c.trim().is_empty()),
        }
    }
}

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// One-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Page {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Saturates for absurd page numbers; such pages are simply empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// --- Reviews ---

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub content: String,
    pub rating: i32,
    pub venue_id: uuid::Uuid,
}

impl ReviewInput {
    pub fn validate(&self) -> Result<(), GuiaError> {
        if self.content.trim().is_empty() {
            return Err(GuiaError::Validation("Review content is empty".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(GuiaError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(())
    }
}

// --- Chat ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageInput {
    pub message: String,
    pub session_id: Option<String>,
}

/// Coarse intent guessed from keywords in a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Recommendation,
    Location,
    Price,
    Hours,
    General,
    Error,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Recommendation => write!(f, "recommendation"),
            Intent::Location => write!(f, "location"),
            Intent::Price => write!(f, "price"),
            Intent::Hours => write!(f, "hours"),
            Intent::General => write!(f, "general"),
            Intent::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub extracted_intent: Intent,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extracted_entities: BTreeMap<String, serde_json::Value>,
}

impl ChatReply {
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            response: format!("Error: {message}"),
            extracted_intent: Intent::Error,
            extracted_entities: BTreeMap::new(),
        }
    }
}

// --- Import ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_found: usize,
    pub new_added: usize,
    pub duplicates: usize,
    pub zones_assigned: usize,
}
