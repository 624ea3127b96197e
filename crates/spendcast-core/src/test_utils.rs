//! Test utilities for spendcast-core
//!
//! A mock Ollama server that answers `/api/tags` and `/api/generate` on an
//! ephemeral port, recording every generate request it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Reply used by `MockOllamaServer::start`
pub const DEFAULT_SUGGESTIONS_REPLY: &str = r#"{"suggestions": ["Cook at home twice more per week.", "Cap entertainment spending at $50 until month end.", "Move $20 a week into your savings goal."]}"#;

/// A generate request as received by the mock server
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedRequest {
    pub model: String,
    pub prompt: String,
    #[serde(default)]
    pub system: Option<String>,
}

#[derive(Clone)]
struct MockState {
    reply: Arc<String>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock Ollama server for tests
pub struct MockOllamaServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOllamaServer {
    /// Start a server that replies with three well-formed suggestions
    pub async fn start() -> Self {
        Self::start_with_reply(DEFAULT_SUGGESTIONS_REPLY).await
    }

    /// Start a server whose `response` field is always `reply`
    pub async fn start_with_reply(reply: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply: Arc::new(reply.to_string()),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL for this server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Generate requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Serialize)]
struct ModelInfo {
    name: String,
}

#[derive(Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}

async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "llama3.2:latest".to_string(),
        }],
    })
}

async fn handle_generate(
    State(state): State<MockState>,
    Json(request): Json<RecordedRequest>,
) -> Json<GenerateResponse> {
    let model = request.model.clone();
    state.requests.lock().unwrap().push(request);

    Json(GenerateResponse {
        model,
        response: state.reply.as_ref().clone(),
        done: true,
    })
}
