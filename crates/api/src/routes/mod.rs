//! API route handlers.

pub mod auth;
pub mod cities;
pub mod health;
pub mod states;
pub mod users;

/// Treats an empty query value the same as an absent one.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
