//! Store initialization command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pubrec_core::db::{create_pool, schema};
use pubrec_core::StoreConfig;

use crate::config::PubrecConfig;

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to create the store (default: ~/.pubrec/pubrecord.db)
    #[arg(long, env = "PUBREC_DB")]
    pub db: Option<PathBuf>,
}

/// Create the store file and apply the schema. Safe to re-run.
pub async fn run_init(args: InitArgs, config: PubrecConfig) -> Result<()> {
    let store = StoreConfig {
        read_only: false,
        ..config.store_with(args.db)
    };

    if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let pool = create_pool(&store)
        .await
        .with_context(|| format!("Failed to open {}", store.path.display()))?;
    schema::apply(&pool).await.context("Failed to apply schema")?;
    pool.close().await;

    tracing::info!(db = %store.path.display(), "Store initialized");
    println!("{}", store.path.display());
    Ok(())
}
