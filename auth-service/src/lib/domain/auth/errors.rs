use std::fmt;

use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Unique user attribute that collided at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Username,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateField::Email => f.write_str("email"),
            DuplicateField::Username => f.write_str("username"),
        }
    }
}

/// Closed set of failures surfaced by the auth engine.
///
/// `Password`, `Database` and `Unknown` are all unclassified failures; their
/// detail is for logs only.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Authentication failed")]
    Authentication,

    #[error("Not enough permissions")]
    Authorization,

    #[error("User with this {0} already exists")]
    UserAlreadyExists(DuplicateField),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthError::TokenExpired,
            JwtError::InvalidToken(msg) => AuthError::InvalidToken(msg),
            JwtError::UnexpectedTokenType { .. } => AuthError::InvalidToken(err.to_string()),
            JwtError::EncodingFailed(msg) => AuthError::Unknown(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenType;

    use super::*;

    #[test]
    fn test_jwt_error_mapping() {
        assert!(matches!(
            AuthError::from(JwtError::TokenExpired),
            AuthError::TokenExpired
        ));
        assert!(matches!(
            AuthError::from(JwtError::InvalidToken("bad".to_string())),
            AuthError::InvalidToken(_)
        ));
        assert!(matches!(
            AuthError::from(JwtError::UnexpectedTokenType {
                expected: TokenType::Refresh,
                found: TokenType::Access,
            }),
            AuthError::InvalidToken(_)
        ));
        assert!(matches!(
            AuthError::from(JwtError::EncodingFailed("boom".to_string())),
            AuthError::Unknown(_)
        ));
    }

    #[test]
    fn test_duplicate_message() {
        let err = AuthError::UserAlreadyExists(DuplicateField::Username);
        assert_eq!(err.to_string(), "User with this username already exists");
    }
}
