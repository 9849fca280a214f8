//! Store configuration
//!
//! Deserialized from the `[store]` table of the config file; every field
//! has a default so a partial table is fine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default maximum connections for the pool.
/// Reads are short and SQLite serializes at the file level anyway.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default busy timeout while another process holds the write lock.
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the public record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite database written by the indexer
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
    /// Open the store read-only (the query layer never writes)
    pub read_only: bool,
}

impl StoreConfig {
    /// Config pointing at `path` with default pool settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }

    /// Default store location: ~/.pubrec/pubrecord.db
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pubrec")
            .join("pubrecord.db")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
            read_only: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StoreConfig::new("/tmp/record.db");
        assert_eq!(config.path, PathBuf::from("/tmp/record.db"));
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert!(config.read_only);
    }

    #[test]
    fn partial_table_fills_defaults() {
        let config: StoreConfig = toml::from_str(
            r#"
            path = "/var/lib/pubrec/pubrecord.db"
            max_connections = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.max_connections, 2);
        assert_eq!(config.busy_timeout_secs, DEFAULT_BUSY_TIMEOUT_SECS);
        assert!(config.read_only);
    }
}
