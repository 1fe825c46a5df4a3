//! API error types and handling

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use agrorural_application::ApplicationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error payload, wrapped in `{"error": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine readable error kind
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ApiError {
    pub fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Application(e) => match e {
                ApplicationError::ValidationFailed(_) => {
                    (StatusCode::BAD_REQUEST, "validation_error")
                }
                ApplicationError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                ApplicationError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
                ApplicationError::BusinessRuleViolation(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "business_rule_violation")
                }
                ApplicationError::RepositoryError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "repository_error")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: ErrorBody {
                error_type: error_type.to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
