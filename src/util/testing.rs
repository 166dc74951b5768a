// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CompletionClient, CompletionRequest};
use crate::domain::DomainError;

/// Owned copy of a request the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub json_mode: bool,
}

impl From<&CompletionRequest<'_>> for RecordedRequest {
    fn from(request: &CompletionRequest<'_>) -> Self {
        Self {
            api_key: request.api_key.to_string(),
            model: request.model.to_string(),
            system_prompt: request.system_prompt.to_string(),
            user_prompt: request.user_prompt.to_string(),
            json_mode: request.json_mode,
        }
    }
}

#[derive(Default)]
struct MockState {
    replies: VecDeque<Result<String, DomainError>>,
    requests: Vec<RecordedRequest>,
}

/// Shared stub completion client for testing the generator and the HTTP port
///
/// Replies are served in the order they were configured; the last one is
/// repeated for every further call. Clones share state, so a test can keep a
/// handle for assertions after moving the mock into a generator.
///
/// # Examples
///
/// ```
/// use flashgen::util::testing::MockCompletionClient;
///
/// let mock = MockCompletionClient::builder()
///     .with_response(r#"{"flashcards": [{"front": "Q", "back": "A"}]}"#)
///     .build();
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockCompletionClient {
    state: Arc<Mutex<MockState>>,
    calls: Arc<AtomicUsize>,
}

impl MockCompletionClient {
    pub fn builder() -> MockCompletionClientBuilder {
        MockCompletionClientBuilder::new()
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        state.requests.push(RecordedRequest::from(request));

        let reply = if state.replies.len() > 1 {
            state.replies.pop_front()
        } else {
            state.replies.front().cloned()
        };

        reply.unwrap_or_else(|| {
            Err(DomainError::Upstream(
                "no mock response configured".to_string(),
            ))
        })
    }
}

/// Builder for MockCompletionClient
pub struct MockCompletionClientBuilder {
    replies: VecDeque<Result<String, DomainError>>,
}

impl MockCompletionClientBuilder {
    pub fn new() -> Self {
        Self {
            replies: VecDeque::new(),
        }
    }

    /// Queue raw completion content
    pub fn with_response(mut self, content: impl Into<String>) -> Self {
        self.replies.push_back(Ok(content.into()));
        self
    }

    /// Queue a failure
    pub fn with_error(mut self, error: DomainError) -> Self {
        self.replies.push_back(Err(error));
        self
    }

    pub fn build(self) -> MockCompletionClient {
        MockCompletionClient {
            state: Arc::new(Mutex::new(MockState {
                replies: self.replies,
                requests: Vec::new(),
            })),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Default for MockCompletionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build `{"flashcards": [...]}` content with `count` numbered cards
pub fn flashcards_json(count: usize) -> String {
    let cards: Vec<serde_json::Value> = (1..=count)
        .map(|i| serde_json::json!({ "front": format!("Q{i}"), "back": format!("A{i}") }))
        .collect();
    serde_json::json!({ "flashcards": cards }).to_string()
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "tower", "h2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
