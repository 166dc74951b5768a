use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Request captured by the stub completion service
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Local chat-completions server answering every call with a fixed reply
#[allow(dead_code)]
pub struct StubUpstream {
    pub endpoint: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl StubUpstream {
    /// Serve `reply` as the raw response body with `status`
    pub async fn start(status: StatusCode, reply: Value) -> Result<Self> {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            reply,
            captured: captured.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(handle))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind stub upstream")?;
        let address = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            endpoint: format!("http://{address}/v1/chat/completions"),
            captured,
        })
    }

    /// Serve a successful completion whose message content is `content`
    pub async fn with_content(content: &str) -> Result<Self> {
        Self::start(StatusCode::OK, completion_envelope(content)).await
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

async fn handle(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    if let Ok(mut captured) = state.captured.lock() {
        captured.push(CapturedRequest {
            authorization: header("authorization"),
            organization: header("openai-organization"),
            project: header("openai-project"),
            body,
        });
    }
    (state.status, Json(state.reply.clone()))
}

/// Minimal chat-completions response carrying `content`
#[allow(dead_code)]
pub fn completion_envelope(content: &str) -> Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
