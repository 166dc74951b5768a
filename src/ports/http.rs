// src/ports/http.rs
use crate::application::{CompletionClient, FlashcardGenerator};
use crate::constants::{CORS_MAX_AGE_SECS, GENERATE_ROUTE};
use crate::domain::{DomainError, FlashcardRequest, GenerationResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed request body: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Domain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller; upstream detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::MalformedPayload(_) => "Malformed request body".to_string(),
            AppError::Domain(DomainError::Validation(msg)) => msg.clone(),
            AppError::Domain(DomainError::Configuration(_)) => {
                "Flashcard generation is not configured".to_string()
            }
            AppError::Domain(DomainError::Upstream(_)) => {
                "Flashcard generation service is unavailable".to_string()
            }
            AppError::Domain(DomainError::MalformedResponse(_)) => {
                "Failed to generate flashcards".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Generation request failed");
        } else {
            warn!(error = %self, "Generation request rejected");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn generate_handler<C: CompletionClient + 'static>(
    State(generator): State<Arc<FlashcardGenerator<C>>>,
    payload: Result<Json<FlashcardRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    let result = generator.generate(&request).await?;
    info!(cards = result.len(), "Serving generated flashcards");

    Ok(Json(result))
}

/// Build the application router around a shared generator.
pub fn router<C: CompletionClient + 'static>(generator: Arc<FlashcardGenerator<C>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS));

    Router::new()
        .route(GENERATE_ROUTE, post(generate_handler::<C>))
        .layer(cors)
        .with_state(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::MalformedPayload("eof".to_string()), StatusCode::BAD_REQUEST)]
    #[case(DomainError::Validation("x".to_string()).into(), StatusCode::BAD_REQUEST)]
    #[case(DomainError::Configuration("x".to_string()).into(), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(DomainError::Upstream("x".to_string()).into(), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(DomainError::MalformedResponse("x".to_string()).into(), StatusCode::INTERNAL_SERVER_ERROR)]
    fn given_error_kind_when_mapping_then_uses_expected_status(
        #[case] error: AppError,
        #[case] expected: StatusCode,
    ) {
        assert_eq!(error.status(), expected);
    }

    #[test]
    fn given_malformed_response_when_mapping_then_hides_upstream_detail() {
        let error: AppError =
            DomainError::MalformedResponse(r#"{"flashcards": [{"front": "partial"#.to_string()).into();

        let message = error.public_message();

        assert!(!message.contains("partial"));
    }
}
