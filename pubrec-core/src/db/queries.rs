//! Prepared read queries over the public record
//!
//! One statement per lookup, prepared once when the store is opened and
//! kept in [`Statements`]. Each method runs exactly one statement and hands
//! back raw rows; interpreting nulls is left to [`super::rows`].
//!
//! Every bulletin-returning query selects the same eight columns under the
//! same aliases so they all decode into [`BulletinRow`]. The blacklist is
//! joined through a one-row-per-txid subquery so a duplicated ban never
//! duplicates a bulletin in a list.

use sqlx::sqlite::{SqlitePool, SqliteStatement};
use sqlx::{Executor, Statement};

use super::rows::{
    AuthorSummaryRow, BlacklistRow, BlockHeadRow, BoardSummaryRow, BulletinRow, FreshnessRow,
};
use crate::Result;

const SELECT_BULLETIN_BY_TXID: &str = r#"
    SELECT bulletins.txid AS txid, bulletins.author AS author, bulletins.board AS board,
           bulletins.message AS message, bulletins.timestamp AS bltn_ts,
           bulletins.block AS block_hash, blocks.timestamp AS block_ts,
           blacklist.reason AS ban_reason
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    LEFT JOIN blacklist ON bulletins.txid = blacklist.txid
    WHERE bulletins.txid = ?1
    LIMIT 1
"#;

// Aggregate without GROUP BY: always one row, all-null head when the
// hash is unknown.
const SELECT_BLOCK_HEAD: &str = r#"
    SELECT blocks.hash AS hash, blocks.prevhash AS prevhash, blocks.height AS height,
           blocks.timestamp AS timestamp, COUNT(bulletins.txid) AS num_bltns
    FROM blocks
    LEFT JOIN bulletins ON bulletins.block = blocks.hash
    WHERE blocks.hash = ?1
"#;

const SELECT_BLOCK_BULLETINS: &str = r#"
    SELECT bulletins.txid AS txid, bulletins.author AS author, bulletins.board AS board,
           bulletins.message AS message, bulletins.timestamp AS bltn_ts,
           bulletins.block AS block_hash, blocks.timestamp AS block_ts,
           ban.reason AS ban_reason
    FROM bulletins
    JOIN blocks ON bulletins.block = blocks.hash
    LEFT JOIN (SELECT txid, MIN(reason) AS reason FROM blacklist GROUP BY txid) AS ban
        ON bulletins.txid = ban.txid
    WHERE bulletins.block = ?1
    ORDER BY bulletins.timestamp ASC, bulletins.txid ASC
"#;

const SELECT_AUTHOR: &str = r#"
    SELECT bulletins.author AS address, COUNT(*) AS num_bltns,
           MIN(blocks.timestamp) AS first_blk_ts
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    WHERE bulletins.author = ?1
"#;

const SELECT_AUTHOR_BULLETINS: &str = r#"
    SELECT bulletins.txid AS txid, bulletins.author AS author, bulletins.board AS board,
           bulletins.message AS message, bulletins.timestamp AS bltn_ts,
           bulletins.block AS block_hash, blocks.timestamp AS block_ts,
           ban.reason AS ban_reason
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    LEFT JOIN (SELECT txid, MIN(reason) AS reason FROM blacklist GROUP BY txid) AS ban
        ON bulletins.txid = ban.txid
    WHERE bulletins.author = ?1
    ORDER BY blocks.timestamp ASC, bulletins.timestamp ASC, bulletins.txid ASC
"#;

const SELECT_BLACKLIST: &str = r#"
    SELECT txid, reason FROM blacklist ORDER BY txid ASC, reason ASC
"#;

// "Created by" is the author of the first confirmed bulletin, falling back
// to the earliest self-reported timestamp while nothing is confirmed.
const SELECT_BOARD_SUMMARY: &str = r#"
    SELECT bulletins.board AS name, COUNT(*) AS num_bltns,
           MAX(bulletins.timestamp) AS last_active,
           MIN(blocks.timestamp) AS created_at,
           (SELECT origin.author
              FROM bulletins AS origin
              LEFT JOIN blocks AS origin_blk ON origin.block = origin_blk.hash
             WHERE origin.board = ?1
             ORDER BY origin_blk.timestamp IS NULL, origin_blk.timestamp,
                      origin.timestamp, origin.txid
             LIMIT 1) AS created_by
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    WHERE bulletins.board = ?1
"#;

const SELECT_BOARD_BULLETINS: &str = r#"
    SELECT bulletins.txid AS txid, bulletins.author AS author, bulletins.board AS board,
           bulletins.message AS message, bulletins.timestamp AS bltn_ts,
           bulletins.block AS block_hash, blocks.timestamp AS block_ts,
           ban.reason AS ban_reason
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    LEFT JOIN (SELECT txid, MIN(reason) AS reason FROM blacklist GROUP BY txid) AS ban
        ON bulletins.txid = ban.txid
    WHERE bulletins.board = ?1
    ORDER BY blocks.timestamp ASC, bulletins.timestamp ASC, bulletins.txid ASC
"#;

const SELECT_NIL_BOARD_SUMMARY: &str = r#"
    SELECT '' AS name, COUNT(*) AS num_bltns,
           MAX(bulletins.timestamp) AS last_active,
           MIN(blocks.timestamp) AS created_at,
           (SELECT origin.author
              FROM bulletins AS origin
              LEFT JOIN blocks AS origin_blk ON origin.block = origin_blk.hash
             WHERE origin.board IS NULL OR origin.board = ''
             ORDER BY origin_blk.timestamp IS NULL, origin_blk.timestamp,
                      origin.timestamp, origin.txid
             LIMIT 1) AS created_by
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    WHERE bulletins.board IS NULL OR bulletins.board = ''
"#;

const SELECT_NIL_BOARD_BULLETINS: &str = r#"
    SELECT bulletins.txid AS txid, bulletins.author AS author, bulletins.board AS board,
           bulletins.message AS message, bulletins.timestamp AS bltn_ts,
           bulletins.block AS block_hash, blocks.timestamp AS block_ts,
           ban.reason AS ban_reason
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    LEFT JOIN (SELECT txid, MIN(reason) AS reason FROM blacklist GROUP BY txid) AS ban
        ON bulletins.txid = ban.txid
    WHERE bulletins.board IS NULL OR bulletins.board = ''
    ORDER BY blocks.timestamp ASC, bulletins.timestamp ASC, bulletins.txid ASC
"#;

const SELECT_ALL_BOARDS: &str = r#"
    SELECT bulletins.board AS name, COUNT(*) AS num_bltns,
           MAX(bulletins.timestamp) AS last_active,
           MIN(blocks.timestamp) AS created_at,
           (SELECT origin.author
              FROM bulletins AS origin
              LEFT JOIN blocks AS origin_blk ON origin.block = origin_blk.hash
             WHERE origin.board = bulletins.board
             ORDER BY origin_blk.timestamp IS NULL, origin_blk.timestamp,
                      origin.timestamp, origin.txid
             LIMIT 1) AS created_by
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    WHERE bulletins.board IS NOT NULL AND bulletins.board <> ''
    GROUP BY bulletins.board
    ORDER BY created_at ASC, name ASC
"#;

const SELECT_ALL_AUTHORS: &str = r#"
    SELECT bulletins.author AS address, COUNT(*) AS num_bltns,
           MIN(blocks.timestamp) AS first_blk_ts
    FROM bulletins
    LEFT JOIN blocks ON bulletins.block = blocks.hash
    GROUP BY bulletins.author
    ORDER BY bulletins.author ASC
"#;

const SELECT_RECENT_CONFIRMED: &str = r#"
    SELECT bulletins.txid AS txid, bulletins.author AS author, bulletins.board AS board,
           bulletins.message AS message, bulletins.timestamp AS bltn_ts,
           bulletins.block AS block_hash, blocks.timestamp AS block_ts,
           ban.reason AS ban_reason
    FROM bulletins
    JOIN blocks ON bulletins.block = blocks.hash
    LEFT JOIN (SELECT txid, MIN(reason) AS reason FROM blacklist GROUP BY txid) AS ban
        ON bulletins.txid = ban.txid
    WHERE blocks.height > (SELECT MAX(height) FROM blocks) - ?1
    ORDER BY blocks.timestamp DESC, bulletins.timestamp DESC, bulletins.txid ASC
"#;

const SELECT_UNCONFIRMED: &str = r#"
    SELECT bulletins.txid AS txid, bulletins.author AS author, bulletins.board AS board,
           bulletins.message AS message, bulletins.timestamp AS bltn_ts,
           NULL AS block_hash, NULL AS block_ts,
           ban.reason AS ban_reason
    FROM bulletins
    LEFT JOIN (SELECT txid, MIN(reason) AS reason FROM blacklist GROUP BY txid) AS ban
        ON bulletins.txid = ban.txid
    WHERE bulletins.block IS NULL
    ORDER BY bulletins.timestamp ASC, bulletins.txid ASC
"#;

const SELECT_BLOCKS_BY_DAY: &str = r#"
    SELECT blocks.hash AS hash, blocks.prevhash AS prevhash, blocks.height AS height,
           blocks.timestamp AS timestamp, COUNT(bulletins.txid) AS num_bltns
    FROM blocks
    LEFT JOIN bulletins ON bulletins.block = blocks.hash
    WHERE blocks.timestamp >= ?1 AND blocks.timestamp < ?2
    GROUP BY blocks.hash
    ORDER BY blocks.height ASC
"#;

const SELECT_FRESHNESS: &str = r#"
    SELECT (SELECT MAX(timestamp) FROM blocks) AS latest_blk,
           (SELECT MAX(timestamp) FROM bulletins) AS latest_bltn
"#;

/// Every statement the query layer runs, compiled against the store once.
#[derive(Debug)]
pub struct Statements {
    bulletin_by_txid: SqliteStatement<'static>,
    block_head: SqliteStatement<'static>,
    block_bulletins: SqliteStatement<'static>,
    author: SqliteStatement<'static>,
    author_bulletins: SqliteStatement<'static>,
    blacklist: SqliteStatement<'static>,
    board_summary: SqliteStatement<'static>,
    board_bulletins: SqliteStatement<'static>,
    nil_board_summary: SqliteStatement<'static>,
    nil_board_bulletins: SqliteStatement<'static>,
    all_boards: SqliteStatement<'static>,
    all_authors: SqliteStatement<'static>,
    recent_confirmed: SqliteStatement<'static>,
    unconfirmed: SqliteStatement<'static>,
    blocks_by_day: SqliteStatement<'static>,
    freshness: SqliteStatement<'static>,
}

impl Statements {
    /// Compile every statement against `pool`.
    ///
    /// Fails with a store error if the schema is missing or any statement
    /// does not compile, so a broken store is caught at startup.
    pub async fn prepare(pool: &SqlitePool) -> Result<Self> {
        let stmts = Self {
            bulletin_by_txid: prepare(pool, SELECT_BULLETIN_BY_TXID).await?,
            block_head: prepare(pool, SELECT_BLOCK_HEAD).await?,
            block_bulletins: prepare(pool, SELECT_BLOCK_BULLETINS).await?,
            author: prepare(pool, SELECT_AUTHOR).await?,
            author_bulletins: prepare(pool, SELECT_AUTHOR_BULLETINS).await?,
            blacklist: prepare(pool, SELECT_BLACKLIST).await?,
            board_summary: prepare(pool, SELECT_BOARD_SUMMARY).await?,
            board_bulletins: prepare(pool, SELECT_BOARD_BULLETINS).await?,
            nil_board_summary: prepare(pool, SELECT_NIL_BOARD_SUMMARY).await?,
            nil_board_bulletins: prepare(pool, SELECT_NIL_BOARD_BULLETINS).await?,
            all_boards: prepare(pool, SELECT_ALL_BOARDS).await?,
            all_authors: prepare(pool, SELECT_ALL_AUTHORS).await?,
            recent_confirmed: prepare(pool, SELECT_RECENT_CONFIRMED).await?,
            unconfirmed: prepare(pool, SELECT_UNCONFIRMED).await?,
            blocks_by_day: prepare(pool, SELECT_BLOCKS_BY_DAY).await?,
            freshness: prepare(pool, SELECT_FRESHNESS).await?,
        };
        tracing::debug!("Prepared public record statements");
        Ok(stmts)
    }

    pub async fn bulletin_by_txid(
        &self,
        pool: &SqlitePool,
        txid: &str,
    ) -> Result<Option<BulletinRow>> {
        let row = self
            .bulletin_by_txid
            .query_as::<BulletinRow>()
            .bind(txid)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn block_head(&self, pool: &SqlitePool, hash: &str) -> Result<Option<BlockHeadRow>> {
        let row = self
            .block_head
            .query_as::<BlockHeadRow>()
            .bind(hash)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn block_bulletins(&self, pool: &SqlitePool, hash: &str) -> Result<Vec<BulletinRow>> {
        let rows = self
            .block_bulletins
            .query_as::<BulletinRow>()
            .bind(hash)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn author(&self, pool: &SqlitePool, address: &str) -> Result<Option<AuthorSummaryRow>> {
        let row = self
            .author
            .query_as::<AuthorSummaryRow>()
            .bind(address)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn author_bulletins(
        &self,
        pool: &SqlitePool,
        address: &str,
    ) -> Result<Vec<BulletinRow>> {
        let rows = self
            .author_bulletins
            .query_as::<BulletinRow>()
            .bind(address)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn blacklist(&self, pool: &SqlitePool) -> Result<Vec<BlacklistRow>> {
        let rows = self
            .blacklist
            .query_as::<BlacklistRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn board_summary(
        &self,
        pool: &SqlitePool,
        board: &str,
    ) -> Result<Option<BoardSummaryRow>> {
        let row = self
            .board_summary
            .query_as::<BoardSummaryRow>()
            .bind(board)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn board_bulletins(&self, pool: &SqlitePool, board: &str) -> Result<Vec<BulletinRow>> {
        let rows = self
            .board_bulletins
            .query_as::<BulletinRow>()
            .bind(board)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn nil_board_summary(&self, pool: &SqlitePool) -> Result<Option<BoardSummaryRow>> {
        let row = self
            .nil_board_summary
            .query_as::<BoardSummaryRow>()
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn nil_board_bulletins(&self, pool: &SqlitePool) -> Result<Vec<BulletinRow>> {
        let rows = self
            .nil_board_bulletins
            .query_as::<BulletinRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn all_boards(&self, pool: &SqlitePool) -> Result<Vec<BoardSummaryRow>> {
        let rows = self
            .all_boards
            .query_as::<BoardSummaryRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn all_authors(&self, pool: &SqlitePool) -> Result<Vec<AuthorSummaryRow>> {
        let rows = self
            .all_authors
            .query_as::<AuthorSummaryRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Bulletins confirmed in the last `window` blocks, newest block first.
    pub async fn recent_confirmed(&self, pool: &SqlitePool, window: i64) -> Result<Vec<BulletinRow>> {
        let rows = self
            .recent_confirmed
            .query_as::<BulletinRow>()
            .bind(window)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn unconfirmed(&self, pool: &SqlitePool) -> Result<Vec<BulletinRow>> {
        let rows = self
            .unconfirmed
            .query_as::<BulletinRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Blocks with `start <= timestamp < end`, ascending height.
    pub async fn blocks_by_day(
        &self,
        pool: &SqlitePool,
        start: i64,
        end: i64,
    ) -> Result<Vec<BlockHeadRow>> {
        let rows = self
            .blocks_by_day
            .query_as::<BlockHeadRow>()
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn freshness(&self, pool: &SqlitePool) -> Result<FreshnessRow> {
        let row = self
            .freshness
            .query_as::<FreshnessRow>()
            .fetch_one(pool)
            .await?;
        Ok(row)
    }
}

async fn prepare(pool: &SqlitePool, sql: &'static str) -> Result<SqliteStatement<'static>> {
    let stmt = pool.prepare(sql).await?;
    tracing::trace!(columns = stmt.columns().len(), "Prepared statement");
    Ok(stmt)
}
