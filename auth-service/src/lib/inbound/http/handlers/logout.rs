use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

/// Tokens are stateless, so the client discards them; nothing is revoked here.
pub async fn logout() -> ApiSuccess<MessageResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "Successfully logged out".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub message: String,
}
