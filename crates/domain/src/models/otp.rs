//! One-time password model.

use rand::Rng;

/// Smallest code that can be issued.
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued.
pub const CODE_MAX: u32 = 999_999;

/// A six-digit code bound to a mobile number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode {
    pub mobile_number: String,
    pub code: String,
}

impl OtpCode {
    /// Draws a fresh code uniformly from `[CODE_MIN, CODE_MAX]`.
    pub fn generate(mobile_number: impl Into<String>) -> Self {
        let value = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
        Self {
            mobile_number: mobile_number.into(),
            code: value.to_string(),
        }
    }
}
