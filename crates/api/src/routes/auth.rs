//! Authentication routes: OTP request and token exchange.

use axum::extract::State;
use domain::models::user::{AuthenticateRequest, AuthenticateResponse, TokenRequest, TokenResponse};
use domain::services::OtpError;
use persistence::repositories::UserRepository;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::services::auth::{AuthError, AuthService};

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidMobileNumber | AuthError::UserNotFound => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::Otp(otp) => otp.into(),
            AuthError::Token(e) => ApiError::Internal(format!("Token error: {}", e)),
            AuthError::Database(e) => e.into(),
        }
    }
}

impl From<OtpError> for ApiError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::ResendTooSoon | OtpError::CodeMissing | OtpError::CodeMismatch => {
                ApiError::BadRequest(err.to_string())
            }
            OtpError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        UserRepository::new(state.pool.clone()),
        state.otp_service(),
        state.jwt.clone(),
    )
}

/// `POST /user/authenticate`: sends a one-time code to the mobile number.
pub async fn authenticate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AuthenticateRequest>,
) -> Result<ApiJson<AuthenticateResponse>, ApiError> {
    request.validate()?;

    let otp = auth_service(&state)
        .authenticate(&request.mobile_number)
        .await?;

    Ok(ApiJson(AuthenticateResponse::sent(otp.mobile_number)))
}

/// `POST /user/token`: exchanges a valid code for an access token.
pub async fn token(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<ApiJson<TokenResponse>, ApiError> {
    request.validate()?;

    let token = auth_service(&state)
        .token(&request.mobile_number, &request.code)
        .await?;

    Ok(ApiJson(TokenResponse { token }))
}
