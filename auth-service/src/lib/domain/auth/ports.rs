use async_trait::async_trait;
use auth::IssuedTokenPair;
use auth::TokenClaims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPublicView;
use crate::domain::user::models::Username;

/// Port for auth engine operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// Email uniqueness is checked before username uniqueness; the first
    /// collision found is reported.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email or username is already taken
    /// * `Password` - Password hashing failed
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<UserPublicView, AuthError>;

    /// Check credentials and return the matching active user.
    ///
    /// # Errors
    /// * `Authentication` - Unknown email, inactive user or wrong password
    async fn authenticate(&self, command: &LoginCommand) -> Result<User, AuthError>;

    /// Authenticate and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `Authentication` - Unknown email, inactive user or wrong password
    async fn login(&self, command: LoginCommand) -> Result<IssuedTokenPair, AuthError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Forged, malformed, or not a refresh token
    /// * `TokenExpired` - Refresh token has expired
    /// * `Authentication` - Subject no longer exists or is inactive
    async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokenPair, AuthError>;

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Forged, malformed, or not an access token
    /// * `TokenExpired` - Access token has expired
    fn validate_access(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Resolve the subject of validated claims to an active user.
    ///
    /// # Errors
    /// * `InvalidToken` - Subject is not a user identifier
    /// * `Authentication` - User does not exist or is inactive
    async fn resolve_subject(&self, claims: &TokenClaims) -> Result<User, AuthError>;

    /// Public profile of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    async fn get_profile(&self, id: &UserId) -> Result<UserPublicView, AuthError>;

    /// Soft-delete a user by clearing its active flag.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    async fn deactivate(&self, id: &UserId) -> Result<(), AuthError>;
}

/// Persistence operations for the user aggregate.
///
/// Implementations enforce email and username uniqueness themselves and
/// report a collision on `insert` as `UserAlreadyExists`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Retrieve user by username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email or username is already taken
    /// * `Database` - Store operation failed
    async fn insert(&self, user: User) -> Result<User, AuthError>;

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError>;

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AuthError>;

    /// Mark user inactive.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Database` - Store operation failed
    async fn deactivate(&self, id: &UserId) -> Result<(), AuthError>;
}
