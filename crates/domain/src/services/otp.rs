//! One-time password issuing and verification.
//!
//! Codes live only in a key-value store behind [`OtpStore`]; delivery to the
//! user goes through [`CodeSender`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::OtpCode;

/// How long an issued code stays valid.
pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(60);

/// Errors raised by the OTP flow.
#[derive(Debug, Error)]
pub enum OtpError {
    /// A previous code for this number is still live.
    #[error("please wait a minute to get new code")]
    ResendTooSoon,

    /// No live code exists (never issued, expired, or already used).
    #[error("this code is invalid, please get new one")]
    CodeMissing,

    /// A live code exists but does not match the submitted one.
    #[error("this code is incorrect")]
    CodeMismatch,

    #[error("OTP store error: {0}")]
    Store(String),
}

/// Key-value storage for live codes, one per mobile number.
#[async_trait::async_trait]
pub trait OtpStore: Send + Sync {
    /// Returns the live code for `mobile_number`, if any.
    async fn get(&self, mobile_number: &str) -> Result<Option<String>, OtpError>;

    /// Stores `code` expiring after `ttl`, but only when no live code exists
    /// for `mobile_number`. Returns `false` if a live code was left in place.
    ///
    /// The check and the write happen as one step.
    async fn save_if_absent(
        &self,
        mobile_number: &str,
        code: &str,
        ttl: Duration,
    ) -> Result<bool, OtpError>;

    /// Removes the code for `mobile_number`. Missing keys are not an error.
    async fn delete(&self, mobile_number: &str) -> Result<(), OtpError>;

    /// Connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), OtpError> {
        Ok(())
    }
}

/// Process-local store used in test mode.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, mobile_number: &str) -> Result<Option<String>, OtpError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(mobile_number)
            .filter(|(_, deadline)| Instant::now() < *deadline)
            .map(|(code, _)| code.clone()))
    }

    async fn save_if_absent(
        &self,
        mobile_number: &str,
        code: &str,
        ttl: Duration,
    ) -> Result<bool, OtpError> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, (_, deadline)| now < *deadline);
        if entries.contains_key(mobile_number) {
            return Ok(false);
        }
        entries.insert(mobile_number.to_string(), (code.to_string(), now + ttl));
        Ok(true)
    }

    async fn delete(&self, mobile_number: &str) -> Result<(), OtpError> {
        self.entries.write().await.remove(mobile_number);
        Ok(())
    }
}

/// Delivers an issued code to its owner.
#[async_trait::async_trait]
pub trait CodeSender: Send + Sync {
    async fn send(&self, otp: &OtpCode) -> Result<(), OtpError>;
}

/// Writes codes to the debug log instead of an SMS gateway.
#[derive(Debug, Clone, Default)]
pub struct LogCodeSender;

#[async_trait::async_trait]
impl CodeSender for LogCodeSender {
    async fn send(&self, otp: &OtpCode) -> Result<(), OtpError> {
        tracing::debug!(
            mobile_number = %otp.mobile_number,
            code = %otp.code,
            "OTP code issued"
        );
        Ok(())
    }
}

/// Issues and verifies one-time codes.
#[derive(Clone)]
pub struct OtpService {
    store: Arc<dyn OtpStore>,
    sender: Arc<dyn CodeSender>,
    ttl: Duration,
}

impl OtpService {
    pub fn new(store: Arc<dyn OtpStore>, sender: Arc<dyn CodeSender>, ttl: Duration) -> Self {
        Self { store, sender, ttl }
    }

    /// Issues a fresh code unless one is still live for this number.
    pub async fn issue(&self, mobile_number: &str) -> Result<OtpCode, OtpError> {
        let otp = OtpCode::generate(mobile_number);
        if !self
            .store
            .save_if_absent(mobile_number, &otp.code, self.ttl)
            .await?
        {
            return Err(OtpError::ResendTooSoon);
        }
        self.sender.send(&otp).await?;

        Ok(otp)
    }

    /// Checks `code` against the live one and consumes it on success.
    ///
    /// A wrong guess leaves the live code in place.
    pub async fn verify(&self, mobile_number: &str, code: &str) -> Result<(), OtpError> {
        let stored = self
            .store
            .get(mobile_number)
            .await?
            .ok_or(OtpError::CodeMissing)?;

        if stored != code {
            return Err(OtpError::CodeMismatch);
        }

        self.store.delete(mobile_number).await
    }
}
