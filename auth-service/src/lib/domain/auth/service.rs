use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedTokenPair;
use auth::TokenClaims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::DuplicateField;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPublicView;

/// Auth engine implementation.
///
/// Holds no mutable state of its own: every call is a function of the
/// presented credentials, the signing secret, the clock and the store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token codec
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_active_user(&self, email: &EmailAddress) -> Result<User, AuthError> {
        let user = match self.repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AuthError::Authentication);
            }
        };

        if !user.is_active {
            tracing::debug!(user_id = %user.id, "Login rejected: inactive user");
            return Err(AuthError::Authentication);
        }

        Ok(user)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserPublicView, AuthError> {
        if self.repository.exists_by_email(&command.email).await? {
            return Err(AuthError::UserAlreadyExists(DuplicateField::Email));
        }

        if self.repository.exists_by_username(&command.username).await? {
            return Err(AuthError::UserAlreadyExists(DuplicateField::Username));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        // The store's unique constraints remain authoritative if a concurrent
        // registration slipped in after the checks above.
        let user = User::new(command.username, command.email, password_hash);
        let created_user = self.repository.insert(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(UserPublicView::from(&created_user))
    }

    async fn authenticate(&self, command: &LoginCommand) -> Result<User, AuthError> {
        let user = self.find_active_user(&command.email).await?;

        if !self
            .authenticator
            .verify_password(&command.password, &user.password_hash)?
        {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::Authentication);
        }

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedTokenPair, AuthError> {
        let user = self.authenticate(&command).await?;
        let pair = self.authenticator.issue_token_pair(user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokenPair, AuthError> {
        let claims = self.authenticator.validate_refresh(refresh_token)?;
        let user = self.resolve_subject(&claims).await?;

        // The presented refresh token stays valid until it expires; there is
        // no revocation list to record it in.
        let pair = self.authenticator.issue_token_pair(user.id)?;

        tracing::info!(user_id = %user.id, "Token pair refreshed");

        Ok(pair)
    }

    fn validate_access(&self, token: &str) -> Result<TokenClaims, AuthError> {
        Ok(self.authenticator.validate_access(token)?)
    }

    async fn resolve_subject(&self, claims: &TokenClaims) -> Result<User, AuthError> {
        let user_id =
            UserId::from_string(&claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        match self.repository.find_by_id(&user_id).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => {
                tracing::debug!(user_id = %user_id, "Token subject is inactive");
                Err(AuthError::Authentication)
            }
            None => {
                tracing::debug!(user_id = %user_id, "Token subject not found");
                Err(AuthError::Authentication)
            }
        }
    }

    async fn get_profile(&self, id: &UserId) -> Result<UserPublicView, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|user| UserPublicView::from(&user))
            .ok_or(AuthError::UserNotFound)
    }

    async fn deactivate(&self, id: &UserId) -> Result<(), AuthError> {
        self.repository.deactivate(id).await?;

        tracing::info!(user_id = %id, "User deactivated");

        Ok(())
    }
}
