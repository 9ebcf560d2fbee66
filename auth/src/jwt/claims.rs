use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Kind of bearer token, carried in the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for issued tokens.
///
/// Every token carries exactly one type tag. `jti` is a random nonce so two
/// tokens minted for the same subject within the same second still differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token type tag
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl TokenClaims {
    /// Create claims issued at `issued_at` that expire after `lifetime`.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `token_type` - Access or refresh
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Validity window starting at `issued_at`
    pub fn new(
        subject: impl ToString,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let expires_at = issued_at + lifetime;

        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            token_type,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
