//! HTTP server command
//!
//! Opens the store read-only and runs the JSON API until Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pubrec_core::PublicRecord;
use pubrec_server::run_server;

use crate::config::PubrecConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:1055)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Store path (overrides the config file)
    #[arg(long, env = "PUBREC_DB")]
    pub db: Option<PathBuf>,

    /// Directory served for paths outside the API prefix
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Path the API is mounted under (default: /api)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Log every request
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Allow permissive CORS (all origins)
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: PubrecConfig) -> Result<()> {
    let store = config.store_with(args.db);

    let mut server = config.server;
    if let Some(bind) = args.bind {
        server.bind_addr = bind;
    }
    if let Some(dir) = args.static_dir {
        server.static_dir = Some(dir);
    }
    if let Some(prefix) = args.prefix {
        server.api_prefix = prefix;
    }
    server.verbose |= args.verbose;
    server.cors_permissive |= args.cors_permissive;

    tracing::info!(db = %store.path.display(), "Opening public record");
    let record = PublicRecord::open(&store)
        .await
        .with_context(|| format!("Failed to open store at {}", store.path.display()))?;

    // Blocks until shutdown
    run_server(record, server).await.context("Server error")?;

    Ok(())
}
