use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::llm_engine::EngineError;

/// Everything a handler can fail with. The health endpoint never produces
/// one of these; it reports degraded status in its body instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("model '{0}' not found")]
    ModelNotFound(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            ApiError::ModelNotFound(_) => (StatusCode::NOT_FOUND, "model_not_found"),
            ApiError::Engine(EngineError::Unreachable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unreachable")
            }
            ApiError::Engine(EngineError::Timeout(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout")
            }
            ApiError::Engine(EngineError::Failure { .. })
            | ApiError::Engine(EngineError::InvalidResponse(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();
        let body = json!({
            "error": {
                "message": self.to_string(),
                "type": error_type,
                "code": status.as_u16()
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, error_type) =
            ApiError::Validation("prompt must not be empty".to_string()).status_and_type();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_type, "invalid_request_error");
    }

    #[test]
    fn test_engine_failure_maps_to_bad_gateway() {
        let err = ApiError::Engine(EngineError::Failure {
            status: 500,
            message: "pull model manifest: file does not exist".to_string(),
        });
        let (status, error_type) = err.status_and_type();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_type, "upstream_error");
        assert!(err.to_string().contains("file does not exist"));
    }
}
