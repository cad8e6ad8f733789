mod client;
mod types;

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::{LanguageModel, Message};
use client::OllamaClient;

// =============================================================================
// Ollama Model
// =============================================================================

#[derive(Clone)]
pub struct Ollama {
    model: String,
    client: OllamaClient,
}

impl Ollama {
    pub fn new(base_url: impl AsRef<str>, model: impl Into<String>) -> Result<Self> {
        Ok(Self {
            model: model.into(),
            client: OllamaClient::new(base_url.as_ref())?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether the configured model is installed on the server.
    pub async fn has_model(&self) -> Result<bool> {
        let tags = self.client.tags().await?;
        Ok(tags.models.iter().any(|m| m.name == self.model))
    }
}

#[async_trait]
impl LanguageModel for Ollama {
    async fn chat(&self, messages: &[Message]) -> Result<String> {
        let response = self.client.chat(&self.model, messages).await?;
        Ok(response.message.map(|m| m.content).unwrap_or_default())
    }
}
