//! Admin bootstrap for initial setup.
//!
//! Promotes the configured mobile number to `admin` on startup, creating the
//! account first when needed. Running it again changes nothing.

use domain::models::Role;
use persistence::repositories::UserRepository;
use shared::validation::is_valid_mobile_number;
use sqlx::PgPool;
use tracing::info;

use crate::config::AdminBootstrapConfig;

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Bootstrap the admin account if one is configured.
///
/// Call after migrations.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<(), BootstrapError> {
    let mobile_number = config.bootstrap_mobile_number.trim();
    if mobile_number.is_empty() {
        return Ok(());
    }

    if !is_valid_mobile_number(mobile_number) {
        return Err(BootstrapError::Config(format!(
            "bootstrap mobile number '{}' is not valid",
            mobile_number
        )));
    }

    let users = UserRepository::new(pool.clone());
    let user = users.find_or_create_by_mobile_number(mobile_number).await?;

    if user.role == Role::Admin.as_str() {
        info!(user_id = user.id, "Bootstrap admin already present");
        return Ok(());
    }

    users
        .update_role(user.id, Role::Admin.as_str())
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    info!(user_id = user.id, "Bootstrap admin promoted");
    Ok(())
}
