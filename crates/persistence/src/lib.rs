//! Persistence layer for the Room Reservation backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - The Redis-backed OTP store

pub mod db;
pub mod entities;
pub mod metrics;
pub mod otp_store;
pub mod repositories;
