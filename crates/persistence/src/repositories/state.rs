//! State repository for database operations.

use sqlx::PgPool;

use crate::entities::StateEntity;
use crate::metrics::QueryTimer;

use super::contains_pattern;

/// Repository for state-related database operations.
#[derive(Clone)]
pub struct StateRepository {
    pool: PgPool,
}

impl StateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, title: &str) -> Result<StateEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_state");
        let result = sqlx::query_as::<_, StateEntity>(
            r#"
            INSERT INTO states (title)
            VALUES ($1)
            RETURNING id, title, created_at, updated_at
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<StateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_state_by_id");
        let result = sqlx::query_as::<_, StateEntity>(
            "SELECT id, title, created_at, updated_at FROM states WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List states whose title contains `title`, oldest first.
    pub async fn list(
        &self,
        title: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_states");
        let result = sqlx::query_as::<_, StateEntity>(
            r#"
            SELECT id, title, created_at, updated_at
            FROM states
            WHERE ($1::TEXT IS NULL OR title LIKE $1 ESCAPE '\')
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(title.map(contains_pattern))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    pub async fn count(&self, title: Option<&str>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_states");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM states
            WHERE ($1::TEXT IS NULL OR title LIKE $1 ESCAPE '\')
            "#,
        )
        .bind(title.map(contains_pattern))
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Rename a state. Returns `None` if it does not exist.
    pub async fn update(&self, id: i64, title: &str) -> Result<Option<StateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_state");
        let result = sqlx::query_as::<_, StateEntity>(
            r#"
            UPDATE states
            SET title = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Delete a state and, through the foreign key, its cities.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_state");
        let result = sqlx::query("DELETE FROM states WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        Ok(timer.finish(result)?.rows_affected() > 0)
    }
}
