//! Config file loading
//!
//! Precedence, lowest first: built-in defaults, the TOML file, then CLI
//! flags and their env vars. The file is picked from `--config`, else
//! `$PUBREC_CONFIG`, else `~/.pubrec/config.toml` when it exists.
//!
//! ```toml
//! [store]
//! path = "/var/lib/pubrec/pubrecord.db"
//! max_connections = 8
//!
//! [server]
//! bind_addr = "0.0.0.0:1055"
//! static_dir = "/srv/pubrec/www"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pubrec_core::StoreConfig;
use pubrec_server::ServerConfig;
use serde::Deserialize;

pub const CONFIG_ENV: &str = "PUBREC_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PubrecConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

impl PubrecConfig {
    /// Default config file path: ~/.pubrec/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pubrec")
            .join("config.toml")
    }

    /// Load the config file, or defaults when none is configured.
    ///
    /// An explicitly named file (flag or env) must exist; the default
    /// location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML")
    }

    /// Store config with an optional path override from the command line.
    pub fn store_with(&self, db: Option<PathBuf>) -> StoreConfig {
        match db {
            Some(path) => StoreConfig {
                path,
                ..self.store.clone()
            },
            None => self.store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let config = PubrecConfig::from_toml("").unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.server.api_prefix, "/api");
    }

    #[test]
    fn partial_tables() {
        let config = PubrecConfig::from_toml(
            r#"
            [store]
            path = "/data/record.db"

            [server]
            bind_addr = "0.0.0.0:8080"
            recent_window = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.store.path, PathBuf::from("/data/record.db"));
        assert!(config.store.read_only);
        assert_eq!(config.server.bind_addr.port(), 8080);
        assert_eq!(config.server.recent_window, 12);
    }

    #[test]
    fn db_flag_overrides_file() {
        let config = PubrecConfig::from_toml("[store]\npath = \"/data/record.db\"\nmax_connections = 2").unwrap();
        let store = config.store_with(Some(PathBuf::from("/tmp/other.db")));

        assert_eq!(store.path, PathBuf::from("/tmp/other.db"));
        assert_eq!(store.max_connections, 2);
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PubrecConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nverbose = true\n").unwrap();

        let config = PubrecConfig::load(Some(&path)).unwrap();
        assert!(config.server.verbose);
    }
}
