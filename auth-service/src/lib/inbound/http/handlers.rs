use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;

pub mod deactivate;
pub mod health;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Transport-level failure with the message shown to the client.
///
/// `Unauthorized` responses carry a `WWW-Authenticate: Bearer` challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Authentication => ApiError::Unauthorized(err.to_string()),
            AuthError::Authorization => ApiError::Forbidden(err.to_string()),
            AuthError::UserAlreadyExists(_) => {
                ApiError::Conflict("User already exists".to_string())
            }
            AuthError::UserNotFound => ApiError::NotFound(err.to_string()),
            AuthError::InvalidToken(ref detail) => {
                tracing::debug!(reason = %detail, "Token rejected");
                ApiError::Unauthorized("Invalid token".to_string())
            }
            AuthError::TokenExpired => ApiError::Unauthorized(err.to_string()),
            AuthError::Password(_) | AuthError::Database(_) | AuthError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;

    use super::*;
    use crate::domain::auth::errors::DuplicateField;

    #[test]
    fn test_auth_error_mapping() {
        let cases = [
            (
                AuthError::Authentication,
                ApiError::Unauthorized("Authentication failed".to_string()),
            ),
            (
                AuthError::Authorization,
                ApiError::Forbidden("Not enough permissions".to_string()),
            ),
            (
                AuthError::UserAlreadyExists(DuplicateField::Username),
                ApiError::Conflict("User already exists".to_string()),
            ),
            (
                AuthError::UserNotFound,
                ApiError::NotFound("User not found".to_string()),
            ),
            (
                AuthError::InvalidToken("signature mismatch".to_string()),
                ApiError::Unauthorized("Invalid token".to_string()),
            ),
            (
                AuthError::TokenExpired,
                ApiError::Unauthorized("Token has expired".to_string()),
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err), expected);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let internal = [
            AuthError::Database("connection refused on 10.0.0.3".to_string()),
            AuthError::Password(PasswordError::HashingFailed("out of memory".to_string())),
            AuthError::Unknown("boom".to_string()),
        ];

        for err in internal {
            assert_eq!(
                ApiError::from(err),
                ApiError::InternalServerError("Internal server error".to_string())
            );
        }
    }

    #[test]
    fn test_unauthorized_carries_bearer_challenge() {
        let response = ApiError::Unauthorized("Invalid token".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_other_errors_have_no_challenge() {
        let response = ApiError::Forbidden("Not enough permissions".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
    }
}
