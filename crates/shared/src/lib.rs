//! Shared utilities and common types for the Room Reservation backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT access token issuing and verification
//! - Page/offset arithmetic for list endpoints
//! - Common validation logic (mobile numbers)

pub mod jwt;
pub mod pagination;
pub mod validation;
