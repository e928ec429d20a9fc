//! Role gates for staff-only routes.
//!
//! Must run after [`require_user_auth`](super::user_auth::require_user_auth).

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::Role;

use super::user_auth::UserAuth;
use crate::error::ApiError;

/// Set of roles allowed through a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGate {
    AdminOnly,
    SupportOnly,
    AdminOrSupport,
}

impl RoleGate {
    pub fn allows(self, role: Role) -> bool {
        match self {
            RoleGate::AdminOnly => role == Role::Admin,
            RoleGate::SupportOnly => role == Role::Support,
            RoleGate::AdminOrSupport => role.is_staff(),
        }
    }
}

pub async fn require_role(State(gate): State<RoleGate>, req: Request<Body>, next: Next) -> Response {
    let allowed = req
        .extensions()
        .get::<UserAuth>()
        .map(|auth| gate.allows(auth.role))
        .unwrap_or(false);

    if !allowed {
        return ApiError::Forbidden("forbidden".to_string()).into_response();
    }

    next.run(req).await
}
