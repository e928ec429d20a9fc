//! Domain services for Room Reservation.
//!
//! Services contain business logic that operates on domain models.

pub mod otp;

pub use otp::{
    CodeSender, InMemoryOtpStore, LogCodeSender, OtpError, OtpService, OtpStore,
    DEFAULT_OTP_TTL,
};
