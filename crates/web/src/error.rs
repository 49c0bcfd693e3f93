use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use storage::dto::common::MessageResponse;

use crate::validation::{FieldError, ValidationFailure};

/// Web layer errors.
///
/// Every variant carries the exact message sent to the client. Internal
/// errors also carry their source as text; it is logged and never sent.
#[derive(Debug)]
pub enum WebError {
    Validation(Vec<FieldError>),
    Unprocessable(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal { message: String, source: String },
}

impl WebError {
    pub fn internal(message: impl Into<String>, source: impl fmt::Display) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.to_string(),
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "Validation error: {} field(s)", errors.len()),
            Self::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::Internal { message, source } => write!(f, "{}: {}", message, source),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Validation(_) | Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self {
            Self::Validation(errors) => {
                (status_code, Json(ValidationFailure { msg: errors })).into_response()
            }
            Self::Internal { message, source } => {
                tracing::error!("{}: {}", message, source);
                (status_code, Json(MessageResponse::new(message))).into_response()
            }
            Self::Unprocessable(msg)
            | Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => (status_code, Json(MessageResponse::new(msg))).into_response(),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
