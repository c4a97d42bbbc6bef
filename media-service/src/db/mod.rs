/// Database access layer
///
/// Connection pooling plus one repository module per entity. The pool
/// is created explicitly at startup and passed by handle into the
/// service layer; nothing reaches for an ambient global.
pub mod comment_repo;
pub mod like_repo;
pub mod playlist_repo;
pub mod subscription_repo;
pub mod tweet_repo;
pub mod user_repo;
pub mod video_repo;
pub mod watch_history_repo;

use crate::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Create the shared connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "database pool created"
    );

    Ok(pool)
}

/// Explicit shutdown; waits for in-flight connections to be released
pub async fn close_pool(pool: &PgPool) {
    pool.close().await;
    info!("database pool closed");
}
