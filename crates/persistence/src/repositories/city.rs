//! City repository for database operations.
//!
//! Cities are always addressed through their owning state; a city id under
//! the wrong state behaves as missing.

use sqlx::PgPool;

use crate::entities::CityEntity;
use crate::metrics::QueryTimer;

use super::contains_pattern;

/// Repository for city-related database operations.
#[derive(Clone)]
pub struct CityRepository {
    pool: PgPool,
}

impl CityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, state_id: i64, title: &str) -> Result<CityEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_city");
        let result = sqlx::query_as::<_, CityEntity>(
            r#"
            WITH inserted AS (
                INSERT INTO cities (title, state_id)
                VALUES ($1, $2)
                RETURNING id, title, state_id, created_at, updated_at
            )
            SELECT c.id, c.title, c.state_id, s.title AS state_title, c.created_at, c.updated_at
            FROM inserted c
            JOIN states s ON s.id = c.state_id
            "#,
        )
        .bind(title)
        .bind(state_id)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    pub async fn find_in_state(
        &self,
        state_id: i64,
        id: i64,
    ) -> Result<Option<CityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_city_in_state");
        let result = sqlx::query_as::<_, CityEntity>(
            r#"
            SELECT c.id, c.title, c.state_id, s.title AS state_title, c.created_at, c.updated_at
            FROM cities c
            JOIN states s ON s.id = c.state_id
            WHERE c.id = $1 AND c.state_id = $2
            "#,
        )
        .bind(id)
        .bind(state_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List the cities of one state whose title contains `title`.
    pub async fn list(
        &self,
        state_id: i64,
        title: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_cities");
        let result = sqlx::query_as::<_, CityEntity>(
            r#"
            SELECT c.id, c.title, c.state_id, s.title AS state_title, c.created_at, c.updated_at
            FROM cities c
            JOIN states s ON s.id = c.state_id
            WHERE c.state_id = $1
              AND ($2::TEXT IS NULL OR c.title LIKE $2 ESCAPE '\')
            ORDER BY c.id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(state_id)
        .bind(title.map(contains_pattern))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    pub async fn count(&self, state_id: i64, title: Option<&str>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_cities");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM cities
            WHERE state_id = $1
              AND ($2::TEXT IS NULL OR title LIKE $2 ESCAPE '\')
            "#,
        )
        .bind(state_id)
        .bind(title.map(contains_pattern))
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Rename a city of the given state. Returns `None` if not found there.
    pub async fn update(
        &self,
        state_id: i64,
        id: i64,
        title: &str,
    ) -> Result<Option<CityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_city");
        let result = sqlx::query_as::<_, CityEntity>(
            r#"
            WITH updated AS (
                UPDATE cities
                SET title = $3, updated_at = NOW()
                WHERE id = $1 AND state_id = $2
                RETURNING id, title, state_id, created_at, updated_at
            )
            SELECT c.id, c.title, c.state_id, s.title AS state_title, c.created_at, c.updated_at
            FROM updated c
            JOIN states s ON s.id = c.state_id
            "#,
        )
        .bind(id)
        .bind(state_id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    pub async fn delete(&self, state_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_city");
        let result = sqlx::query("DELETE FROM cities WHERE id = $1 AND state_id = $2")
            .bind(id)
            .bind(state_id)
            .execute(&self.pool)
            .await;
        Ok(timer.finish(result)?.rows_affected() > 0)
    }
}
