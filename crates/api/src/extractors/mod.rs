//! Custom Axum extractors.

pub mod request;
pub mod user_auth;

pub use request::{ApiJson, ApiPath};
pub use user_auth::UserAuth;
