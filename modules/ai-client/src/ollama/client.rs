use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::debug;

use super::types::*;
use crate::traits::Message;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub(crate) struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn chat(&self, model: &str, messages: &[Message]) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);

        debug!(model = %model, messages = messages.len(), "Ollama chat request");

        let request = ChatRequest {
            model,
            messages,
            stream: false,
        };
        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("Ollama chat error ({}): {}", status, error_text));
        }

        Ok(response.json().await?)
    }

    pub async fn tags(&self) -> Result<TagsResponse> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("Ollama tags error ({}): {}", status, error_text));
        }

        Ok(response.json().await?)
    }
}
