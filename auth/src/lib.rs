//! Authentication utilities library
//!
//! Provides the credential primitives used by the auth service:
//! - Password hashing (Argon2id)
//! - Typed JWT access/refresh token generation and validation
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, TokenType};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let (token, claims) = handler.issue("user123", TokenType::Access).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded, claims);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then issue a token pair
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let pair = auth.issue_token_pair("user123").unwrap();
//! assert_eq!(pair.token_type, "bearer");
//!
//! // Validate the access token
//! let claims = auth.validate_access(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::IssuedTokenPair;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenPolicy;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
