//! Ollama backend implementation
//!
//! Talks to the Ollama HTTP API (`/api/generate`) with prompts taken from
//! the prompt library.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::FinancialSnapshot;
use crate::prompts::{PromptId, PromptLibrary};
use crate::suggestions::prompt_vars;

use super::parsing::parse_suggestions;
use super::AIBackend;

/// Default model when `OLLAMA_MODEL` is not set
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default request timeout when `OLLAMA_TIMEOUT_SECS` is not set
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Ollama backend
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
    prompts: PromptLibrary,
}

impl OllamaBackend {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self::with_timeout(base_url, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, model: &str, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            prompts: PromptLibrary::new(),
        }
    }

    /// Use a specific prompt library instead of the default one
    pub fn with_prompts(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = prompts;
        self
    }

    /// Create from `OLLAMA_HOST`, `OLLAMA_MODEL` and `OLLAMA_TIMEOUT_SECS`
    ///
    /// Returns None when `OLLAMA_HOST` is not set.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout = std::env::var("OLLAMA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self::with_timeout(&host, &model, Duration::from_secs(timeout)))
    }

    async fn generate(&self, system: Option<String>, prompt: String) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            format: "json",
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateResponse = response.json().await?;
        debug!(model = %self.model, "Ollama response: {}", body.response);
        Ok(body.response)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    format: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl AIBackend for OllamaBackend {
    async fn suggest_budget_actions(&self, snapshot: &FinancialSnapshot) -> Result<Vec<String>> {
        let prompt = self.prompts.get(PromptId::BudgetSuggestions)?;
        let vars = prompt_vars(snapshot);

        let response = self
            .generate(prompt.render_system(&vars), prompt.render_user(&vars))
            .await?;

        parse_suggestions(&response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
