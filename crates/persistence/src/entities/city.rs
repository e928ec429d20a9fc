//! City entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A cities row joined with its state's title.
#[derive(Debug, Clone, FromRow)]
pub struct CityEntity {
    pub id: i64,
    pub title: String,
    pub state_id: i64,
    pub state_title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CityEntity> for domain::models::City {
    fn from(entity: CityEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            state_id: entity.state_id,
            state_title: entity.state_title,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
