use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenClaims;
use crate::jwt::TokenPolicy;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Stateless apart from the immutable signing secret and lifetime policy, so a
/// single instance can be shared across concurrent requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Access and refresh tokens handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedTokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl Authenticator {
    /// Create a new authenticator with default token lifetimes.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_policy(jwt_secret, TokenPolicy::default())
    }

    /// Create an authenticator with explicit token lifetimes.
    pub fn with_policy(jwt_secret: &[u8], policy: TokenPolicy) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::with_policy(jwt_secret, policy),
        }
    }

    pub fn policy(&self) -> &TokenPolicy {
        self.jwt_handler.policy()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password too long or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue an access/refresh pair bound to `subject`.
    ///
    /// Callers verify the password (login) or the refresh token (rotation)
    /// before asking for a pair.
    pub fn issue_token_pair(&self, subject: impl ToString) -> Result<IssuedTokenPair, JwtError> {
        self.issue_token_pair_at(subject, Utc::now())
    }

    pub fn issue_token_pair_at(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<IssuedTokenPair, JwtError> {
        let subject = subject.to_string();
        let (access_token, _) = self.jwt_handler.issue_at(&subject, TokenType::Access, now)?;
        let (refresh_token, _) = self.jwt_handler.issue_at(&subject, TokenType::Refresh, now)?;

        Ok(IssuedTokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in: self.policy().access_lifetime.num_seconds(),
        })
    }

    /// Validate and decode a token of any type.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature or structure invalid
    /// * `TokenExpired` - Token has expired
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate a token and require it to be an access token.
    pub fn validate_access(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.validate_typed_at(token, TokenType::Access, Utc::now())
    }

    /// Validate a token and require it to be a refresh token.
    pub fn validate_refresh(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.validate_typed_at(token, TokenType::Refresh, Utc::now())
    }

    /// Validate a token of the `expected` type against an explicit time.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature or structure invalid
    /// * `TokenExpired` - Token has expired
    /// * `UnexpectedTokenType` - Token is valid but of the other type
    pub fn validate_typed_at(
        &self,
        token: &str,
        expected: TokenType,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, JwtError> {
        let claims = self.jwt_handler.decode_at(token, now)?;

        if claims.token_type != expected {
            return Err(JwtError::UnexpectedTokenType {
                expected,
                found: claims.token_type,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_token_pair() {
        let authenticator = Authenticator::new(SECRET);

        let pair = authenticator
            .issue_token_pair("user123")
            .expect("Failed to issue token pair");

        assert_eq!(pair.token_type, "bearer");
        assert_eq!(pair.expires_in, 15 * 60);
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = authenticator
            .validate_access(&pair.access_token)
            .expect("Access token validation failed");
        assert_eq!(access.sub, "user123");

        let refresh = authenticator
            .validate_refresh(&pair.refresh_token)
            .expect("Refresh token validation failed");
        assert_eq!(refresh.sub, "user123");
    }

    #[test]
    fn test_verify_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert_eq!(authenticator.verify_password("my_password", &hash), Ok(true));
        assert_eq!(
            authenticator.verify_password("wrong_password", &hash),
            Ok(false)
        );
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let authenticator = Authenticator::new(SECRET);
        let pair = authenticator.issue_token_pair("user123").unwrap();

        let result = authenticator.validate_access(&pair.refresh_token);
        assert_eq!(
            result,
            Err(JwtError::UnexpectedTokenType {
                expected: TokenType::Access,
                found: TokenType::Refresh,
            })
        );
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let authenticator = Authenticator::new(SECRET);
        let pair = authenticator.issue_token_pair("user123").unwrap();

        let result = authenticator.validate_refresh(&pair.access_token);
        assert!(matches!(
            result,
            Err(JwtError::UnexpectedTokenType { .. })
        ));
    }

    #[test]
    fn test_custom_policy_sets_expires_in() {
        let policy = TokenPolicy::new(Duration::minutes(5), Duration::days(1));
        let authenticator = Authenticator::with_policy(SECRET, policy);

        let pair = authenticator.issue_token_pair("user123").unwrap();
        assert_eq!(pair.expires_in, 300);
    }

    #[test]
    fn test_expired_access_token() {
        let authenticator = Authenticator::new(SECRET);
        let issued = Utc::now() - Duration::hours(1);
        let pair = authenticator.issue_token_pair_at("user123", issued).unwrap();

        assert_eq!(
            authenticator.validate_access(&pair.access_token),
            Err(JwtError::TokenExpired)
        );
        // Refresh token from the same pair is still within its window
        assert!(authenticator.validate_refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
