use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use backdesk_core::AuthError;
use backdesk_core::catalog::CatalogError;
use serde_json::json;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

/// Transport-level error: a status code plus a client-safe message.
///
/// Domain errors convert into this via the `From` impls below; storage and
/// internal failures are logged here and replaced with a generic message so
/// infrastructure details never reach a client.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(_)
            | AuthError::InvalidRole
            | AuthError::PasswordMismatch
            | AuthError::PasswordUnchanged => Self::bad_request(err.to_string()),
            AuthError::InvalidCredentials | AuthError::TokenInvalid | AuthError::Unauthenticated => {
                Self::unauthorized(err.to_string())
            }
            AuthError::Forbidden => Self::forbidden(err.to_string()),
            AuthError::UserNotFound => Self::not_found(err.to_string()),
            AuthError::EmailExists => Self::conflict(err.to_string()),
            AuthError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                Self::internal("internal server error")
            }
            AuthError::Internal(message) => {
                tracing::error!(error = %message, "internal failure");
                Self::internal("internal server error")
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(_) => Self::bad_request(err.to_string()),
            CatalogError::NotFound => Self::not_found(err.to_string()),
            CatalogError::DuplicateSku => Self::conflict(err.to_string()),
            CatalogError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                Self::internal("internal server error")
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "unhandled failure");
        Self::internal("internal server error")
    }
}
