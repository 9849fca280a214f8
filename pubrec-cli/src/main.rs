//! pubrec CLI - read-only access to the bulletin public record
//!
//! - `serve`: run the JSON HTTP API (optionally with a static site)
//! - `query`: run one lookup and print it as JSON
//! - `init`: create an empty store with the schema

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::PubrecConfig;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "pubrec",
    author,
    version,
    about = "Read-only query layer over a blockchain-derived bulletin board record",
    long_about = "Serve and query the public record of bulletins, blocks and the \
                  moderation blacklist written by a chain indexer."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: $PUBREC_CONFIG or ~/.pubrec/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Run one lookup against the store and print JSON
    Query(commands::query::QueryArgs),
    /// Create an empty store with the public record schema
    Init(commands::init::InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    let config = PubrecConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await?,
        Commands::Query(args) => commands::run_query(args, config).await?,
        Commands::Init(args) => commands::run_init(args, config).await?,
    }
    Ok(())
}
