//! User repository for database operations.
//!
//! Every read ignores soft-deleted rows.

use sqlx::PgPool;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

use super::contains_pattern;

const USER_COLUMNS: &str =
    "id, full_name, mobile_number, role, created_at, updated_at, deleted_at";

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a live user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find a live user by mobile number.
    pub async fn find_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_mobile_number");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE mobile_number = $1 AND deleted_at IS NULL"
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Create a new user account.
    pub async fn create_user(
        &self,
        mobile_number: &str,
        full_name: &str,
        role: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (mobile_number, full_name, role)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(mobile_number)
        .bind(full_name)
        .bind(role)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Returns the live user for `mobile_number`, creating a nameless
    /// `user` account when none exists.
    ///
    /// Concurrent callers for the same number converge on one row.
    pub async fn find_or_create_by_mobile_number(
        &self,
        mobile_number: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("find_or_create_user");
        let inserted = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (mobile_number, full_name, role)
            VALUES ($1, '', 'user')
            ON CONFLICT (mobile_number) WHERE deleted_at IS NULL DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(mobile_number)
        .fetch_optional(&self.pool)
        .await;
        match timer.finish(inserted)? {
            Some(user) => Ok(user),
            None => self
                .find_by_mobile_number(mobile_number)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Rename a live user. Returns `None` if no such user.
    pub async fn update_full_name(
        &self,
        id: i64,
        full_name: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_full_name");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users
            SET full_name = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Set name and role of a live user. Returns `None` if no such user.
    pub async fn update_profile(
        &self,
        id: i64,
        full_name: &str,
        role: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_profile");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users
            SET full_name = $2, role = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(full_name)
        .bind(role)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Change the role of a live user.
    pub async fn update_role(&self, id: i64, role: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_role");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Soft-delete a user. Returns false if the user was already gone.
    pub async fn soft_delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("soft_delete_user");
        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        Ok(timer.finish(result)?.rows_affected() > 0)
    }

    /// List live users matching the optional substring filters, oldest first.
    pub async fn list(
        &self,
        mobile_number: Option<&str>,
        full_name: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_users");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL OR mobile_number LIKE $1 ESCAPE '\')
              AND ($2::TEXT IS NULL OR full_name LIKE $2 ESCAPE '\')
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(mobile_number.map(contains_pattern))
        .bind(full_name.map(contains_pattern))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Count live users matching the same filters as [`Self::list`].
    pub async fn count(
        &self,
        mobile_number: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_users");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE deleted_at IS NULL
              AND ($1::TEXT IS NULL OR mobile_number LIKE $1 ESCAPE '\')
              AND ($2::TEXT IS NULL OR full_name LIKE $2 ESCAPE '\')
            "#,
        )
        .bind(mobile_number.map(contains_pattern))
        .bind(full_name.map(contains_pattern))
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }
}
