//! Mobile-number authentication.
//!
//! Two steps: `authenticate` issues a one-time code for a mobile number,
//! `token` exchanges a correct code for an access token.

use std::sync::Arc;

use domain::models::{OtpCode, User};
use domain::services::{OtpError, OtpService};
use persistence::repositories::UserRepository;
use shared::jwt::{JwtConfig, JwtError};
use shared::validation::is_valid_mobile_number;
use thiserror::Error;

use crate::middleware::metrics::{record_otp_issued, record_otp_verification};

/// Error types for authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("mobile number format is not valid")]
    InvalidMobileNumber,

    #[error(transparent)]
    Otp(#[from] OtpError),

    /// Code was correct but the account vanished in between.
    #[error("this code is invalid, please get new one")]
    UserNotFound,

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Authentication service for OTP login.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    otp: OtpService,
    jwt: Arc<JwtConfig>,
}

impl AuthService {
    pub fn new(users: UserRepository, otp: OtpService, jwt: Arc<JwtConfig>) -> Self {
        Self { users, otp, jwt }
    }

    /// Ensures an account exists for `mobile_number` and sends it a fresh code.
    pub async fn authenticate(&self, mobile_number: &str) -> Result<OtpCode, AuthError> {
        if !is_valid_mobile_number(mobile_number) {
            return Err(AuthError::InvalidMobileNumber);
        }

        let user = self
            .users
            .find_or_create_by_mobile_number(mobile_number)
            .await?;

        let otp = self.otp.issue(mobile_number).await?;
        record_otp_issued();

        tracing::info!(user_id = user.id, "OTP code issued");

        Ok(otp)
    }

    /// Verifies `code` and returns a signed access token for the account.
    pub async fn token(&self, mobile_number: &str, code: &str) -> Result<String, AuthError> {
        if let Err(err) = self.otp.verify(mobile_number, code).await {
            record_otp_verification(match err {
                OtpError::CodeMissing => "missing",
                OtpError::CodeMismatch => "mismatch",
                _ => "error",
            });
            return Err(err.into());
        }
        record_otp_verification("success");

        let user: User = self
            .users
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or(AuthError::UserNotFound)?
            .into();

        let token = self
            .jwt
            .generate_access_token(user.id, &user.mobile_number, user.role.as_str())?;

        tracing::info!(user_id = user.id, role = %user.role, "Access token issued");

        Ok(token)
    }
}
