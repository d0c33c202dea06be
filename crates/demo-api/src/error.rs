//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use demo_core::DomainError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::UserNotFound(_)
            | DomainError::GroupNotFound(_)
            | DomainError::FilterNotFound(_)
            | DomainError::ProcessDefinitionNotFound { .. }
            | DomainError::ProcessInstanceNotFound(_)
            | DomainError::TaskNotFound(_) => ApiError::NotFound(message),
            DomainError::NotAuthorized { .. } | DomainError::IdentityReadOnly => ApiError::Forbidden(message),
            DomainError::ValidationError(_) | DomainError::UnknownExpression(_) => ApiError::BadRequest(message),
            DomainError::UserAlreadyExists(_)
            | DomainError::GroupAlreadyExists(_)
            | DomainError::FilterNameAlreadyExists(_)
            | DomainError::TaskAlreadyClaimed { .. } => ApiError::Conflict(message),
            DomainError::DelegateFailed(_)
            | DomainError::DocumentUnavailable(_)
            | DomainError::PasswordHashError(_)
            | DomainError::InternalError(_) => ApiError::InternalError(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_domain_error_status() {
        let cases = [
            (DomainError::FilterNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                DomainError::NotAuthorized {
                    user_id: "john".to_string(),
                    permission: "READ".to_string(),
                    resource: "filter".to_string(),
                    resource_id: "f".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (DomainError::UnknownExpression("${x()}".to_string()), StatusCode::BAD_REQUEST),
            (DomainError::DelegateFailed("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
