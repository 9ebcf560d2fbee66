use thiserror::Error;

use super::claims::TokenType;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Unexpected token type: expected {expected}, found {found}")]
    UnexpectedTokenType {
        expected: TokenType,
        found: TokenType,
    },
}
