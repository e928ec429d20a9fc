//! User JWT authentication middleware.
//!
//! Validates the Bearer token, then re-loads the user so that deleted
//! accounts and role changes take effect immediately.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::{Role, User};
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated user stored in request extensions.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user_id: i64,
    pub mobile_number: String,
    /// Role read from the live user row, not from the token.
    pub role: Role,
}

impl From<&User> for UserAuth {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            mobile_number: user.mobile_number.clone(),
            role: user.role,
        }
    }
}

/// Extracts the raw token from an `Authorization` header value.
fn bearer_token(header: Option<&str>) -> Result<&str, ApiError> {
    let header =
        header.ok_or_else(|| ApiError::Unauthorized("no token have been provided".to_string()))?;

    header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| ApiError::Unauthorized("wrong token type".to_string()))
}

async fn authenticate(state: &AppState, header: Option<&str>) -> Result<UserAuth, ApiError> {
    let token = bearer_token(header)?;

    let claims = state.jwt.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        ApiError::Unauthorized("invalid token".to_string())
    })?;

    let user: User = UserRepository::new(state.pool.clone())
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid user".to_string()))?
        .into();

    Ok(UserAuth::from(&user))
}

/// Middleware that requires a valid access token for a live user.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default().to_string());

    match authenticate(&state, header.as_deref()).await {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
