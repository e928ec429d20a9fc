use std::sync::Arc;

use anyhow::{Context, Result};
use domain::services::{InMemoryOtpStore, OtpStore};
use persistence::otp_store::RedisOtpStore;
use room_reservation_api::{app, config, middleware, services};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging)?;
    middleware::init_metrics()?;

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&(&config.database).into()).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let otp_store: Arc<dyn OtpStore> = if config.uses_in_memory_otp_store() {
        warn!("Using in-memory OTP store; codes do not survive restarts");
        Arc::new(InMemoryOtpStore::new())
    } else {
        let store = RedisOtpStore::connect(&config.redis.url)
            .await
            .context("failed to connect to Redis")?;
        Arc::new(store)
    };

    services::bootstrap_admin(&pool, &config.admin).await?;

    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool, otp_store)?;

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
