use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer access token and resolves its subject
/// to an active user.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.auth_service.validate_access(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        ApiError::from(e)
    })?;

    let user = state
        .auth_service
        .resolve_subject(&claims)
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id: user.id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            ApiError::from(AuthError::Authentication)
        })?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::from(AuthError::Authentication))?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => {
            tracing::debug!("Authorization header is not a bearer credential");
            Err(ApiError::from(AuthError::Authentication))
        }
    }
}
