//! Error types for the webhook server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use orchestrator::OrchestratorError;

/// Errors surfaced by webhook handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Orchestration failed.
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Orchestrator(err) = self;
        let (status, message) = match &err {
            OrchestratorError::InvalidAddress(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            OrchestratorError::UnknownUser(_) => (StatusCode::NOT_FOUND, err.to_string()),
            OrchestratorError::OptInRequired => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            OrchestratorError::Store(_) | OrchestratorError::Engine(_) => {
                tracing::error!("Orchestration error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for webhook handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: OrchestratorError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(OrchestratorError::InvalidAddress("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(OrchestratorError::UnknownUser("5551234567".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(OrchestratorError::OptInRequired),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
