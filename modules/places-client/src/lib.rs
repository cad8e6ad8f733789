//! Google Places Text Search client used to bulk-import venues.

pub mod error;
pub mod types;

pub use error::{PlacesError, Result};
pub use types::{normalize_category, PlaceCandidate, ADDRESS_UNAVAILABLE};

use std::collections::HashSet;
use std::time::Duration;

use tracing::{info, warn};
use types::TextSearchResponse;

const BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google requires a short wait before a `next_page_token` becomes valid.
const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

/// Queries that together cover the city's food and drink venues.
pub const DEFAULT_QUERIES: &[&str] = &[
    "restaurantes en Huelva España",
    "bares en Huelva España",
    "cafeterías en Huelva España",
    "tapas Huelva",
];

pub struct PlacesClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    page_delay: Duration,
}

impl PlacesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PlacesError::MissingApiKey);
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: BASE_URL.to_string(),
            page_delay: PAGE_TOKEN_DELAY,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Run one Text Search query, following result pages.
    ///
    /// A failure on the first page is an error. A failure on a later page ends
    /// the search with the results gathered so far.
    pub async fn search_text(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let url = format!("{}/textsearch/json", self.base_url);
        let mut candidates = Vec::new();
        let mut page_token: Option<String> = None;
        let mut request_count = 0;

        loop {
            request_count += 1;
            tracing::debug!(query, request_count, "Places text search request");

            let mut params = vec![("query", query), ("key", self.api_key.as_str())];
            if let Some(token) = page_token.as_deref() {
                params.push(("pagetoken", token));
            }

            let resp = self.client.get(&url).query(&params).send().await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                if request_count == 1 {
                    return Err(PlacesError::Api {
                        status: status.as_u16(),
                        message: body,
                    });
                }
                warn!(query, status = status.as_u16(), "Places page request failed, stopping");
                break;
            }

            let page: TextSearchResponse = serde_json::from_str(&resp.text().await?)?;
            if !page.is_success() {
                let api_status = page.status.unwrap_or_default();
                if request_count == 1 {
                    return Err(PlacesError::Api {
                        status: status.as_u16(),
                        message: page.error_message.unwrap_or(api_status),
                    });
                }
                warn!(query, status = %api_status, "Places API status not OK, stopping");
                break;
            }

            let found = page.results.len();
            candidates.extend(page.results.into_iter().filter_map(|r| r.into_candidate()));
            tracing::debug!(query, found, "Places page parsed");

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => {
                    page_token = Some(token);
                    tokio::time::sleep(self.page_delay).await;
                }
                None => break,
            }
        }

        Ok(candidates)
    }

    /// Run every query and de-duplicate by case-insensitive name. The first
    /// occurrence wins.
    pub async fn search_city_venues(&self, queries: &[&str]) -> Result<Vec<PlaceCandidate>> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for query in queries {
            info!(query, "Searching places");
            for candidate in self.search_text(query).await? {
                if seen.insert(candidate.name.to_lowercase()) {
                    unique.push(candidate);
                }
            }
        }

        info!(count = unique.len(), "Unique places found");
        Ok(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_rejected() {
        assert!(matches!(PlacesClient::new("  "), Err(PlacesError::MissingApiKey)));
        assert!(PlacesClient::new("key").is_ok());
    }
}
