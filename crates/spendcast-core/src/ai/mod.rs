//! Pluggable local AI backend
//!
//! - `AIBackend` trait: the operations the rest of the crate needs
//! - `AIClient` enum: concrete wrapper providing Clone and static dispatch
//! - Backends: `OllamaBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: `ollama` (default) or `mock`
//! - `OLLAMA_HOST`: Ollama server URL (required for the ollama backend)
//! - `OLLAMA_MODEL`: model name (default: llama3.2)
//! - `OLLAMA_TIMEOUT_SECS`: request timeout (default: 60)

mod mock;
mod ollama;
pub mod parsing;
pub mod types;

pub use mock::MockBackend;
pub use ollama::{OllamaBackend, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FinancialSnapshot;

/// Operations every AI backend provides
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Ask for three short budgeting suggestions based on a spending summary
    async fn suggest_budget_actions(&self, snapshot: &FinancialSnapshot) -> Result<Vec<String>>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Model name (for logging)
    fn model(&self) -> &str;

    /// Host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client
#[derive(Clone)]
pub enum AIClient {
    Ollama(OllamaBackend),
    Mock(MockBackend),
}

impl AIClient {
    /// Create a client from `AI_BACKEND` and the backend's own variables
    ///
    /// Returns None when the selected backend is not configured.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "ollama" => OllamaBackend::from_env().map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to ollama");
                OllamaBackend::from_env().map(AIClient::Ollama)
            }
        }
    }

    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AIBackend for AIClient {
    async fn suggest_budget_actions(&self, snapshot: &FinancialSnapshot) -> Result<Vec<String>> {
        match self {
            AIClient::Ollama(b) => b.suggest_budget_actions(snapshot).await,
            AIClient::Mock(b) => b.suggest_budget_actions(snapshot).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
