//! Domain layer for the Room Reservation backend.
//!
//! This crate contains:
//! - Domain models (User, Role, State, City, OtpCode) and request/response DTOs
//! - The role policy used by administrative endpoints
//! - One-time password issuing and verification

pub mod models;
pub mod services;
