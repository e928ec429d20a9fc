//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod city;
pub mod state;
pub mod user;

pub use city::CityEntity;
pub use state::StateEntity;
pub use user::UserEntity;
