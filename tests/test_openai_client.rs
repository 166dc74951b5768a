mod helpers;

use anyhow::Result;
use axum::http::StatusCode;
use flashgen::application::{CompletionClient, CompletionRequest};
use flashgen::domain::DomainError;
use flashgen::infrastructure::OpenAiClient;
use helpers::{completion_envelope, StubUpstream};

fn request() -> CompletionRequest<'static> {
    CompletionRequest {
        api_key: "sk-test",
        model: "gpt-4o",
        system_prompt: "You are a flashcard generator.",
        user_prompt: "Rust lifetimes",
        json_mode: true,
    }
}

#[tokio::test]
async fn given_successful_completion_when_completing_then_returns_message_content() -> Result<()> {
    // Arrange
    let upstream = StubUpstream::with_content(r#"{"flashcards": []}"#).await?;
    let client = OpenAiClient::new(&upstream.endpoint)?;

    // Act
    let content = client.complete(&request()).await?;

    // Assert
    assert_eq!(content, r#"{"flashcards": []}"#);
    Ok(())
}

#[tokio::test]
async fn given_request_when_completing_then_sends_bearer_auth_json_mode_and_messages() -> Result<()> {
    // Arrange
    let upstream = StubUpstream::with_content("{}").await?;
    let client = OpenAiClient::new(&upstream.endpoint)?
        .with_organization(Some("org-42".to_string()))
        .with_project(Some("proj-7".to_string()));

    // Act
    client.complete(&request()).await?;

    // Assert
    let captured = upstream.requests();
    assert_eq!(captured.len(), 1);
    let sent = &captured[0];
    assert_eq!(sent.authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(sent.organization.as_deref(), Some("org-42"));
    assert_eq!(sent.project.as_deref(), Some("proj-7"));
    assert_eq!(sent.body["model"], "gpt-4o");
    assert_eq!(sent.body["response_format"]["type"], "json_object");
    assert_eq!(sent.body["messages"][0]["role"], "system");
    assert_eq!(sent.body["messages"][1]["role"], "user");
    assert_eq!(sent.body["messages"][1]["content"], "Rust lifetimes");
    Ok(())
}

#[tokio::test]
async fn given_error_status_when_completing_then_returns_upstream_error() -> Result<()> {
    // Arrange
    let upstream = StubUpstream::start(
        StatusCode::UNAUTHORIZED,
        serde_json::json!({ "error": { "message": "Incorrect API key provided" } }),
    )
    .await?;
    let client = OpenAiClient::new(&upstream.endpoint)?;

    // Act
    let result = client.complete(&request()).await;

    // Assert
    match result {
        Err(DomainError::Upstream(msg)) => assert!(msg.contains("401")),
        other => panic!("Expected Upstream error, got {other:?}"),
    }
    assert_eq!(upstream.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn given_no_project_when_completing_then_omits_project_header() -> Result<()> {
    // Arrange
    let upstream = StubUpstream::with_content("{}").await?;
    let client = OpenAiClient::new(&upstream.endpoint)?.with_project(Some(String::new()));

    // Act
    client.complete(&request()).await?;

    // Assert
    let captured = upstream.requests();
    assert_eq!(captured[0].project, None);
    assert_eq!(captured[0].organization, None);
    Ok(())
}

#[tokio::test]
async fn given_success_status_with_unreadable_envelope_when_completing_then_returns_upstream_error() -> Result<()> {
    // Arrange
    let upstream = StubUpstream::start(
        StatusCode::OK,
        serde_json::Value::String("not an envelope".to_string()),
    )
    .await?;
    let client = OpenAiClient::new(&upstream.endpoint)?;

    // Act
    let result = client.complete(&request()).await;

    // Assert
    match result {
        Err(DomainError::Upstream(msg)) => assert!(msg.contains("envelope")),
        other => panic!("Expected Upstream error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn given_null_content_when_completing_then_returns_malformed_response() -> Result<()> {
    // Arrange
    let mut envelope = completion_envelope("");
    envelope["choices"][0]["message"]["content"] = serde_json::Value::Null;
    let upstream = StubUpstream::start(StatusCode::OK, envelope).await?;
    let client = OpenAiClient::new(&upstream.endpoint)?;

    // Act
    let result = client.complete(&request()).await;

    // Assert
    assert!(matches!(result, Err(DomainError::MalformedResponse(_))));
    Ok(())
}

#[tokio::test]
async fn given_unreachable_endpoint_when_completing_then_returns_upstream_error() -> Result<()> {
    // Arrange: bind and drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let address = listener.local_addr()?;
    drop(listener);
    let client = OpenAiClient::new(format!("http://{address}/v1/chat/completions"))?;

    // Act
    let result = client.complete(&request()).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Upstream(_))));
    Ok(())
}
