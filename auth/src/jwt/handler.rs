use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::claims::TokenType;
use super::errors::JwtError;
use super::policy::TokenPolicy;

/// JWT token handler for encoding and decoding tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a single symmetric secret. Token
/// lifetimes come from the injected `TokenPolicy`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    policy: TokenPolicy,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key and the default lifetimes.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_policy(secret, TokenPolicy::default())
    }

    /// Create a JWT handler with explicit token lifetimes.
    pub fn with_policy(secret: &[u8], policy: TokenPolicy) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            policy,
        }
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Mint a token of the given type for `subject`, valid from now.
    ///
    /// # Returns
    /// Encoded token together with the claims it carries
    pub fn issue(
        &self,
        subject: impl ToString,
        token_type: TokenType,
    ) -> Result<(String, TokenClaims), JwtError> {
        self.issue_at(subject, token_type, Utc::now())
    }

    /// Mint a token as if issued at `now`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<(String, TokenClaims), JwtError> {
        let claims = TokenClaims::new(subject, token_type, now, self.policy.lifetime(token_type));
        let token = self.encode(&claims)?;
        Ok((token, claims))
    }

    /// Decode and validate a JWT token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature is invalid or the token is malformed
    /// * `TokenExpired` - Signature is valid but the token has expired
    pub fn decode(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.decode_at(token, Utc::now())
    }

    /// Decode and validate a JWT token against an explicit validation time.
    ///
    /// The signature and claim structure are checked first; expiry is only
    /// evaluated once those pass, so a forged token never reveals whether it
    /// would have been expired.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is enforced below, after the signature check, without leeway
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = TokenClaims::new("user123", TokenType::Access, Utc::now(), Duration::minutes(5));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_issue_uses_policy_lifetime() {
        let policy = TokenPolicy::new(Duration::minutes(1), Duration::hours(2));
        let handler = JwtHandler::with_policy(SECRET, policy);
        let now = Utc::now();

        let (_, access) = handler.issue_at("user123", TokenType::Access, now).unwrap();
        let (_, refresh) = handler.issue_at("user123", TokenType::Refresh, now).unwrap();

        assert_eq!(access.exp - access.iat, 60);
        assert_eq!(refresh.exp - refresh.iat, 2 * 60 * 60);
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let (token, _) = handler1.issue("user123", TokenType::Access).unwrap();

        let result = handler2.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let issued = Utc::now() - Duration::hours(1);

        let (token, _) = handler.issue_at("user123", TokenType::Access, issued).unwrap();

        let result = handler.decode(&token);
        assert_eq!(result, Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_at_before_expiry() {
        let handler = JwtHandler::new(SECRET);
        let issued = Utc::now() - Duration::hours(1);

        let (token, claims) = handler.issue_at("user123", TokenType::Access, issued).unwrap();

        let decoded = handler
            .decode_at(&token, issued + Duration::minutes(10))
            .expect("Token should be valid before expiry");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token_with_bad_signature_is_invalid() {
        let handler = JwtHandler::new(SECRET);
        let other = JwtHandler::new(b"another_secret_at_least_32_bytes_long");
        let issued = Utc::now() - Duration::days(30);

        let (token, _) = other.issue_at("user123", TokenType::Refresh, issued).unwrap();

        let result = handler.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let handler = JwtHandler::new(SECRET);
        let (token, _) = handler.issue("user123", TokenType::Access).unwrap();

        for (position, original) in token.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(position..position + 1, &replacement.to_string());

            let result = handler.decode(&tampered);
            assert!(
                matches!(result, Err(JwtError::InvalidToken(_))),
                "tampering at position {} was not rejected",
                position
            );
        }
    }

    #[test]
    fn test_decode_rejects_other_algorithm() {
        let handler = JwtHandler::new(SECRET);
        let claims = TokenClaims::new("user123", TokenType::Access, Utc::now(), Duration::minutes(5));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = handler.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
