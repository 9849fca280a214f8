//! Database connection pool management
//!
//! Uses an sqlx `SqlitePool`; each query checks out its own connection so
//! concurrent callers never share a cursor.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::StoreConfig;
use crate::Result;

/// Open a pool against the store described by `config`.
///
/// A read-only pool requires the database file to exist; a writable one
/// creates it when missing. The journal mode is left as the indexer set it.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&StoreConfig::new("pubrecord.db")).await?;
/// ```
pub async fn create_pool(config: &StoreConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .read_only(config.read_only)
        .create_if_missing(!config.read_only)
        .busy_timeout(config.busy_timeout())
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        path = %config.path.display(),
        read_only = config.read_only,
        max_connections = config.max_connections,
        "Store pool opened"
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn read_only_pool_requires_existing_file() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("missing.db"));

        assert!(create_pool(&config).await.is_err());
    }

    #[tokio::test]
    async fn writable_pool_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let config = StoreConfig {
            read_only: false,
            ..StoreConfig::new(&path)
        };

        let pool = create_pool(&config).await.unwrap();
        let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();

        assert_eq!(one, 1);
        assert!(path.exists());
    }
}
