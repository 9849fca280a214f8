//! One-shot lookups printed as pretty JSON
//!
//! Output matches the HTTP API bodies, so `pubrec query board ahimsa-dev`
//! prints what `GET /api/board/ahimsa-dev` would return.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use pubrec_core::models::Day;
use pubrec_core::PublicRecord;
use serde::Serialize;

use crate::config::PubrecConfig;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Store path (overrides the config file)
    #[arg(long, env = "PUBREC_DB", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub lookup: Lookup,
}

#[derive(Subcommand, Debug)]
pub enum Lookup {
    /// A single bulletin (fails if blacklisted)
    Bulletin {
        /// Transaction id, 64 hex chars
        txid: String,
    },
    /// A block head and the bulletins it confirmed
    Block {
        /// Block hash, 64 hex chars
        hash: String,
    },
    /// An author's summary and bulletins
    Author {
        /// Author address
        address: String,
    },
    /// A board's summary and bulletins
    Board {
        /// Board name as posted
        name: String,

        /// The name is already percent-encoded
        #[arg(long)]
        encoded: bool,
    },
    /// Bulletins posted without a board
    Nilboard,
    /// The moderation blacklist
    Blacklist,
    /// Every named board, oldest first
    Boards,
    /// Every author, by address
    Authors,
    /// Bulletins confirmed in the last N blocks
    Recent {
        /// Number of blocks to look back over
        #[arg(long, short = 'n', default_value_t = 6)]
        window: i64,
    },
    /// Bulletins not yet in a block
    Unconfirmed,
    /// Block heads for one UTC day
    Day {
        /// Day as DD-MM-YYYY
        day: String,
    },
    /// Newest block and bulletin timestamps
    Status,
}

/// Run a single lookup and print its JSON
pub async fn run_query(args: QueryArgs, config: PubrecConfig) -> Result<()> {
    let store = config.store_with(args.db);
    let record = PublicRecord::open(&store)
        .await
        .with_context(|| format!("Failed to open store at {}", store.path.display()))?;

    let output = lookup(&record, args.lookup).await;
    record.close().await;

    println!("{}", output?);
    Ok(())
}

async fn lookup(record: &PublicRecord, lookup: Lookup) -> Result<String> {
    match lookup {
        Lookup::Bulletin { txid } => pretty(record.get_bulletin(&txid).await),
        Lookup::Block { hash } => pretty(record.get_block(&hash).await),
        Lookup::Author { address } => pretty(record.get_author(&address).await),
        Lookup::Board { name, encoded } => {
            let raw = if encoded {
                name
            } else {
                urlencoding::encode(&name).into_owned()
            };
            pretty(record.get_board(&raw).await)
        }
        Lookup::Nilboard => pretty(record.get_nil_board().await),
        Lookup::Blacklist => pretty(record.get_blacklist().await),
        Lookup::Boards => pretty(record.get_all_boards().await),
        Lookup::Authors => pretty(record.get_all_authors().await),
        Lookup::Recent { window } => pretty(record.get_recent(window).await),
        Lookup::Unconfirmed => pretty(record.get_unconfirmed().await),
        Lookup::Day { day } => {
            let day = Day::parse(&day)?;
            pretty(record.get_blocks_for_day(day).await)
        }
        Lookup::Status => pretty(record.get_status().await),
    }
}

fn pretty<T: Serialize>(result: pubrec_core::Result<T>) -> Result<String> {
    let value = result?;
    serde_json::to_string_pretty(&value).context("Failed to serialize result")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_propagates_lookup_errors() {
        let err = pretty::<()>(Err(pubrec_core::RecordError::not_found("board", "nope")))
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn pretty_prints_json() {
        let out = pretty(Ok(vec![1, 2])).unwrap();
        assert_eq!(out, "[\n  1,\n  2\n]");
    }
}
