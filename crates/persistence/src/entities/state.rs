//! State entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the states table.
#[derive(Debug, Clone, FromRow)]
pub struct StateEntity {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StateEntity> for domain::models::State {
    fn from(entity: StateEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
