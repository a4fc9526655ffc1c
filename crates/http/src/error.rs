//! Error handling for the shelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ApiMessage;

/// Request-level failures. Only `message` reaches the client.
///
/// Client errors are logged, with their cause, by the handler that builds
/// them. Server errors are logged here when rendered.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("unprocessable entity: {message}")]
    UnprocessableEntity { message: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create an unprocessable entity error
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::UnprocessableEntity {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable name, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::UnprocessableEntity { .. } => "unprocessable_entity",
            AppError::BadRequest { .. } => "bad_request",
            AppError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_code = self.code();

        let message = match self {
            AppError::UnprocessableEntity { message }
            | AppError::BadRequest { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            tracing::error!(
                error_code = %error_code,
                status_code = %status.as_u16(),
                %message,
                "Request error"
            );
        }

        (status, ApiMessage::new(message)).into_response()
    }
}
