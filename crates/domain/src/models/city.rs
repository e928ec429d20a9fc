//! City domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A city belonging to exactly one state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub title: String,
    pub state_id: i64,
    /// Title of the owning state, joined in on read.
    pub state_title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating or renaming a city.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CityRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "title must be between 1 and 255 characters"
    ))]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityResponse {
    pub id: i64,
    pub title: String,
    pub state_id: i64,
    pub state_title: String,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            title: city.title,
            state_id: city.state_id,
            state_title: city.state_title,
        }
    }
}
