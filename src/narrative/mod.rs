//! Narrative generation client for match previews.
//!
//! Turns a rendered statistics summary into a short free-text narrative via
//! an OpenAI-compatible chat endpoint. Strictly best-effort: the call is
//! bounded by a client-level timeout and any failure is downgraded to a
//! visible placeholder so the computed statistics are never lost.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, ScoutError};

/// Narrative client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeConfig {
    /// Whether the CLI should attempt narrative generation at all
    #[serde(default)]
    pub enabled: bool,
    /// API key; taken from NARRATIVE_API_KEY when absent from config files
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key() -> String {
    std::env::var("NARRATIVE_API_KEY").unwrap_or_default()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: default_api_key(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NarrativeConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: true,
            api_key: default_api_key(),
            base_url: std::env::var("NARRATIVE_API_URL").unwrap_or_else(|_| default_base_url()),
            model: std::env::var("NARRATIVE_MODEL").unwrap_or_else(|_| default_model()),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Seam for narrative generation; lets the CLI and tests swap the HTTP
/// client for a stub.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Produce a free-text narrative from a rendered statistics summary
    async fn narrate(&self, stats_summary: &str) -> Result<String>;
}

/// Chat API message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat API request
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat API response
#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// HTTP narrative client
pub struct NarrativeClient {
    config: NarrativeConfig,
    http: Client,
}

impl NarrativeClient {
    /// Create a new client; the timeout is enforced at the HTTP client level
    pub fn new(config: NarrativeConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScoutError::Narrative(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(NarrativeConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        if !self.is_configured() {
            return Err(ScoutError::Narrative(
                "narrative API key not configured".to_string(),
            ));
        }

        debug!("Sending request to narrative API");

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(0.7),
            max_tokens: Some(500),
        };

        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Narrative API error: {} - {}", status, body);
            return Err(ScoutError::Narrative(format!(
                "narrative API error: {} - {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        if content.is_empty() {
            return Err(ScoutError::Narrative(
                "narrative API returned no content".to_string(),
            ));
        }

        debug!("Narrative response received: {} chars", content.len());
        Ok(content)
    }
}

#[async_trait]
impl NarrativeGenerator for NarrativeClient {
    async fn narrate(&self, stats_summary: &str) -> Result<String> {
        let prompt = format!(
            r#"You are a football analyst. Based only on the head-to-head statistics below, write a short match preview narrative (3-4 sentences) in plain prose. Do not invent facts beyond the numbers given.

{}"#,
            stats_summary
        );
        self.chat(&prompt).await
    }
}

/// Run the generator and substitute a visible placeholder on any failure.
///
/// The statistics bundle is already computed by the time this runs; a
/// narrative failure must never invalidate it.
pub async fn narrate_or_fallback(generator: &dyn NarrativeGenerator, summary: &str) -> String {
    match generator.narrate(summary).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Narrative generation failed: {}", e);
            format!("(narrative unavailable: {})", e)
        }
    }
}
