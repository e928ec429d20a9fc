//! User and role domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::validate_mobile_number;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Authorization role attached to every user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Support,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Support => "support",
            Role::User => "user",
        }
    }

    /// Returns true if this role may edit or delete an account holding `target`.
    pub fn can_manage(&self, target: Role) -> bool {
        match self {
            Role::Admin => true,
            Role::Support => target != Role::Admin,
            Role::User => false,
        }
    }

    /// Returns true if this role may grant `role` to another account.
    pub fn can_assign(&self, role: Role) -> bool {
        match self {
            Role::Admin => true,
            Role::Support => role != Role::Admin,
            Role::User => false,
        }
    }

    /// Staff roles may reach the administrative endpoints.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Support)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "support" => Ok(Role::Support),
            "user" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account, identified by its mobile number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub mobile_number: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public representation of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub mobile_number: String,
    pub full_name: String,
    pub joined_at: DateTime<Utc>,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            mobile_number: user.mobile_number,
            full_name: user.full_name,
            joined_at: user.created_at,
            role: user.role,
        }
    }
}

/// Request payload for `POST /user/authenticate`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AuthenticateRequest {
    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,
}

/// Response payload after an OTP code was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub message: String,
    pub mobile_number: String,
}

impl AuthenticateResponse {
    pub fn sent(mobile_number: impl Into<String>) -> Self {
        Self {
            message: "otp code sent".to_string(),
            mobile_number: mobile_number.into(),
        }
    }
}

/// Request payload for `POST /user/token`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "mobile_number is required"))]
    pub mobile_number: String,

    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
}

/// Response payload carrying a freshly issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Request payload for `PUT /user/me`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "full_name must be between 1 and 255 characters"
    ))]
    pub full_name: String,
}

/// Request payload for `PUT /user/users/:id`.
///
/// `role` stays a raw string so an unknown value can be reported as
/// `invalid role` instead of a deserialization error.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "full_name must be between 1 and 255 characters"
    ))]
    pub full_name: String,

    pub role: String,
}

/// Optional filters for the user list.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub mobile_number: Option<String>,
    pub full_name: Option<String>,
}
