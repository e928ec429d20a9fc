//! Extractor for the user placed in extensions by `require_user_auth`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
pub use crate::middleware::user_auth::UserAuth;

#[async_trait]
impl<S> FromRequestParts<S> for UserAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserAuth>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("no token have been provided".to_string()))
    }
}
