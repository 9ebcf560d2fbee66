use chrono::Duration;

use super::claims::TokenType;

/// Token lifetime policy.
///
/// Immutable once built; expiry is computed from it at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub access_lifetime: Duration,
    pub refresh_lifetime: Duration,
}

impl TokenPolicy {
    pub fn new(access_lifetime: Duration, refresh_lifetime: Duration) -> Self {
        Self {
            access_lifetime,
            refresh_lifetime,
        }
    }

    /// Lifetime applied to tokens of the given type.
    pub fn lifetime(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access_lifetime,
            TokenType::Refresh => self.refresh_lifetime,
        }
    }
}

impl Default for TokenPolicy {
    /// 15 minute access tokens, 7 day refresh tokens.
    fn default() -> Self {
        Self {
            access_lifetime: Duration::minutes(15),
            refresh_lifetime: Duration::days(7),
        }
    }
}
