//! State (province) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A state grouping cities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating or renaming a state.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StateRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "title must be between 1 and 255 characters"
    ))]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    pub id: i64,
    pub title: String,
}

impl From<State> for StateResponse {
    fn from(state: State) -> Self {
        Self {
            id: state.id,
            title: state.title,
        }
    }
}
