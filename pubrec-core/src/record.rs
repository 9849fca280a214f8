//! Access facade over the public record
//!
//! [`PublicRecord`] owns the pool and the prepared statements and exposes
//! one method per lookup. It is cheap to clone and safe to share between
//! request handlers; every call checks out its own connection.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::StoreConfig;
use crate::db::{assemble, create_pool, Censorship, Statements};
use crate::error::{RecordError, Result};
use crate::models::{
    AuthorResponse, AuthorSummary, BannedBulletin, BlockHead, BlockResponse, BoardName,
    BoardSummary, Bulletin, Day, Freshness, WholeBoard,
};

/// Handle to the public record store
#[derive(Clone)]
pub struct PublicRecord {
    inner: Arc<PublicRecordInner>,
}

struct PublicRecordInner {
    pool: SqlitePool,
    stmts: Statements,
}

impl PublicRecord {
    /// Open the store and prepare every statement.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let pool = create_pool(config).await?;
        Self::from_pool(pool).await
    }

    /// Prepare every statement against an existing pool.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let stmts = Statements::prepare(&pool).await?;
        Ok(Self {
            inner: Arc::new(PublicRecordInner { pool, stmts }),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Close the pool, waiting for in-flight queries.
    pub async fn close(&self) {
        self.inner.pool.close().await;
    }

    fn stmts(&self) -> &Statements {
        &self.inner.stmts
    }

    /// A single bulletin by txid.
    ///
    /// Blacklisted bulletins are withheld entirely: the call fails with
    /// [`RecordError::Censored`].
    pub async fn get_bulletin(&self, txid: &str) -> Result<Bulletin> {
        tracing::debug!(txid, "get_bulletin");
        self.stmts()
            .bulletin_by_txid(self.pool(), txid)
            .await?
            .ok_or_else(|| RecordError::not_found("bulletin", txid))?
            .into_bulletin(Censorship::Withhold)
    }

    /// A block head and every bulletin it confirmed.
    pub async fn get_block(&self, hash: &str) -> Result<BlockResponse> {
        tracing::debug!(hash, "get_block");
        let head = self
            .stmts()
            .block_head(self.pool(), hash)
            .await?
            .and_then(|row| row.into_head())
            .ok_or_else(|| RecordError::not_found("block", hash))?;

        let rows = self.stmts().block_bulletins(self.pool(), hash).await?;
        assemble::block_response(head, rows)
    }

    /// An author's summary and everything they posted.
    pub async fn get_author(&self, address: &str) -> Result<AuthorResponse> {
        tracing::debug!(address, "get_author");
        let summary = self
            .stmts()
            .author(self.pool(), address)
            .await?
            .and_then(|row| row.into_summary())
            .ok_or_else(|| RecordError::not_found("author", address))?;

        let rows = self.stmts().author_bulletins(self.pool(), address).await?;
        assemble::author_response(summary, rows)
    }

    pub async fn get_blacklist(&self) -> Result<Vec<BannedBulletin>> {
        tracing::debug!("get_blacklist");
        let rows = self.stmts().blacklist(self.pool()).await?;
        Ok(rows.into_iter().map(BannedBulletin::from).collect())
    }

    /// A board summary and its bulletins, looked up by the percent-encoded
    /// name a client put in the URL.
    ///
    /// A name that decodes to the empty string is the nil board.
    pub async fn get_board(&self, raw_encoded_name: &str) -> Result<WholeBoard> {
        let board = BoardName::decode(raw_encoded_name)?;
        if board.is_nil() {
            return self.get_nil_board().await;
        }
        tracing::debug!(board = board.as_str(), "get_board");

        let summary = self
            .stmts()
            .board_summary(self.pool(), board.as_str())
            .await?
            .and_then(|row| row.into_summary())
            .ok_or_else(|| RecordError::not_found("board", board.as_str()))?;

        let rows = self
            .stmts()
            .board_bulletins(self.pool(), board.as_str())
            .await?;
        assemble::whole_board(summary, rows)
    }

    /// Bulletins posted without a board (NULL or empty board column).
    pub async fn get_nil_board(&self) -> Result<WholeBoard> {
        tracing::debug!("get_nil_board");
        let summary = self
            .stmts()
            .nil_board_summary(self.pool())
            .await?
            .and_then(|row| row.into_summary())
            .ok_or_else(|| RecordError::not_found("board", ""))?;

        let rows = self.stmts().nil_board_bulletins(self.pool()).await?;
        assemble::whole_board(summary, rows)
    }

    /// Summaries of every named board, oldest first.
    pub async fn get_all_boards(&self) -> Result<Vec<BoardSummary>> {
        tracing::debug!("get_all_boards");
        let rows = self.stmts().all_boards(self.pool()).await?;
        Ok(rows.into_iter().filter_map(|row| row.into_summary()).collect())
    }

    pub async fn get_all_authors(&self) -> Result<Vec<AuthorSummary>> {
        tracing::debug!("get_all_authors");
        let rows = self.stmts().all_authors(self.pool()).await?;
        Ok(rows.into_iter().filter_map(|row| row.into_summary()).collect())
    }

    /// Bulletins confirmed within the last `block_window` blocks, most
    /// recent block first.
    pub async fn get_recent(&self, block_window: i64) -> Result<Vec<Bulletin>> {
        tracing::debug!(block_window, "get_recent");
        if block_window <= 0 {
            return Ok(Vec::new());
        }
        let rows = self
            .stmts()
            .recent_confirmed(self.pool(), block_window)
            .await?;
        assemble::bulletin_list(rows)
    }

    /// Bulletins not yet in a block, oldest self-reported timestamp first.
    pub async fn get_unconfirmed(&self) -> Result<Vec<Bulletin>> {
        tracing::debug!("get_unconfirmed");
        let rows = self.stmts().unconfirmed(self.pool()).await?;
        assemble::bulletin_list(rows)
    }

    /// Block heads timestamped within `day` (UTC), ascending height.
    ///
    /// Unlike the other list lookups, a day without blocks is
    /// [`RecordError::NotFound`] rather than an empty list.
    pub async fn get_blocks_for_day(&self, day: impl Into<Day>) -> Result<Vec<BlockHead>> {
        let day = day.into();
        tracing::debug!(%day, "get_blocks_for_day");
        let heads: Vec<BlockHead> = self
            .stmts()
            .blocks_by_day(self.pool(), day.start(), day.end())
            .await?
            .into_iter()
            .filter_map(|row| row.into_head())
            .collect();

        if heads.is_empty() {
            return Err(RecordError::not_found("blocks for day", day.to_string()));
        }
        Ok(heads)
    }

    /// Latest block and bulletin timestamps.
    pub async fn get_status(&self) -> Result<Freshness> {
        tracing::debug!("get_status");
        let row = self.stmts().freshness(self.pool()).await?;
        Ok(row.into())
    }
}

impl std::fmt::Debug for PublicRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicRecord")
            .field("pool_size", &self.inner.pool.size())
            .finish()
    }
}
