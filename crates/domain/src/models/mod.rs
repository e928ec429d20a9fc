//! Domain models for Room Reservation.

pub mod city;
pub mod otp;
pub mod pagination;
pub mod state;
pub mod user;

pub use city::City;
pub use otp::OtpCode;
pub use pagination::ListResponse;
pub use state::State;
pub use user::{Role, User};
