use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for every successful response that carries a payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub msg: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(msg: impl Into<String>, data: T) -> Self {
        Self {
            msg: msg.into(),
            data,
        }
    }
}

/// Envelope for responses that only carry a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
