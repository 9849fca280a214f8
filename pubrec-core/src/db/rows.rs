//! Raw rows and their mapping into response records
//!
//! Each raw row type is a `FromRow` struct with one field per selected
//! column, every nullable column an `Option`. The same type decodes a
//! single-row fetch or each row of a multi-row fetch, so the censorship and
//! optionality rules below apply identically to both.

use sqlx::FromRow;

use crate::error::{RecordError, Result};
use crate::models::{AuthorSummary, BannedBulletin, BlockHead, BoardSummary, Bulletin, Freshness};

/// How a blacklisted bulletin is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Censorship {
    /// Fail with [`RecordError::Censored`]. Used for direct lookups.
    Withhold,
    /// Return the bulletin with its message blanked and the ban reason set.
    /// Used whenever the bulletin appears inside a list.
    Redact,
}

/// Columns shared by every bulletin-returning query
#[derive(Debug, Clone, FromRow)]
pub struct BulletinRow {
    pub txid: String,
    pub author: String,
    pub board: Option<String>,
    pub message: String,
    pub bltn_ts: i64,
    pub block_hash: Option<String>,
    pub block_ts: Option<i64>,
    pub ban_reason: Option<String>,
}

impl BulletinRow {
    pub fn into_bulletin(self, censorship: Censorship) -> Result<Bulletin> {
        let (message, banned_reason) = match (self.ban_reason, censorship) {
            (Some(_), Censorship::Withhold) => return Err(RecordError::censored(self.txid)),
            (Some(reason), Censorship::Redact) => (String::new(), Some(reason)),
            (None, _) => (self.message, None),
        };

        // Block timestamp only means something next to a block hash.
        let blk_timestamp = self.block_hash.as_ref().and(self.block_ts);

        Ok(Bulletin {
            txid: self.txid,
            board: self.board,
            author: self.author,
            message,
            timestamp: self.bltn_ts,
            block: self.block_hash,
            blk_timestamp,
            banned_reason,
        })
    }
}

/// Block head columns; every field is nullable because the single-block
/// lookup is an aggregate that yields a row of nulls for an unknown hash.
#[derive(Debug, Clone, FromRow)]
pub struct BlockHeadRow {
    pub hash: Option<String>,
    pub prevhash: Option<String>,
    pub height: Option<i64>,
    pub timestamp: Option<i64>,
    pub num_bltns: i64,
}

impl BlockHeadRow {
    /// `None` when the row is the all-null "no such block" row.
    pub fn into_head(self) -> Option<BlockHead> {
        let hash = self.hash?;
        Some(BlockHead {
            hash,
            prev_hash: self.prevhash.filter(|p| !p.is_empty()),
            timestamp: self.timestamp.unwrap_or_default(),
            height: self.height.map(|h| h.max(0) as u64).unwrap_or_default(),
            num_bltns: self.num_bltns.max(0) as u64,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct BoardSummaryRow {
    pub name: Option<String>,
    pub num_bltns: i64,
    pub last_active: Option<i64>,
    pub created_at: Option<i64>,
    pub created_by: Option<String>,
}

impl BoardSummaryRow {
    /// `None` when the board matched no bulletins.
    ///
    /// `created_by` is the existence signal: the count is 0 on the
    /// all-null row but the name may still be filled in for the nil board.
    pub fn into_summary(self) -> Option<BoardSummary> {
        let created_by = self.created_by?;
        Some(BoardSummary {
            name: self.name.unwrap_or_default(),
            num_bltns: self.num_bltns.max(0) as u64,
            created_at: self.created_at.unwrap_or_default(),
            last_active: self.last_active.unwrap_or_default(),
            created_by,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AuthorSummaryRow {
    pub address: Option<String>,
    pub num_bltns: i64,
    pub first_blk_ts: Option<i64>,
}

impl AuthorSummaryRow {
    /// `None` when the address has never posted.
    pub fn into_summary(self) -> Option<AuthorSummary> {
        let address = self.address?;
        Some(AuthorSummary {
            address,
            num_bltns: self.num_bltns.max(0) as u64,
            first_blk_ts: self.first_blk_ts,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct BlacklistRow {
    pub txid: String,
    pub reason: String,
}

impl From<BlacklistRow> for BannedBulletin {
    fn from(row: BlacklistRow) -> Self {
        Self {
            txid: row.txid,
            reason: row.reason,
        }
    }
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct FreshnessRow {
    pub latest_blk: Option<i64>,
    pub latest_bltn: Option<i64>,
}

impl From<FreshnessRow> for Freshness {
    fn from(row: FreshnessRow) -> Self {
        Self {
            latest_blk: row.latest_blk,
            latest_bltn: row.latest_bltn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> BulletinRow {
        BulletinRow {
            txid: "b0a1ba6e40d8f35aac526eecbc05d82b2a6d3c8d6a316627f593cbe592a777be".into(),
            author: "mnPZBNTrLoCoSkAgSfKeeCujU3129PG6vn".into(),
            board: Some("ahimsa-dev".into()),
            message: "Let it be".into(),
            bltn_ts: 1413216499,
            block_hash: Some(
                "00000000777213b4fd7c5d5a71b9b52608356c4194203b1b63d1bb0e6141d17d".into(),
            ),
            block_ts: Some(1414813562),
            ban_reason: None,
        }
    }

    #[test]
    fn clean_row_maps_every_field() {
        let bltn = row().into_bulletin(Censorship::Withhold).unwrap();
        assert_eq!(bltn.message, "Let it be");
        assert_eq!(bltn.blk_timestamp, Some(1414813562));
        assert_eq!(bltn.banned_reason, None);
        assert_eq!(bltn.board.as_deref(), Some("ahimsa-dev"));
    }

    #[test]
    fn withhold_fails_banned_row() {
        let banned = BulletinRow {
            ban_reason: Some("The Beatles are slanderous.".into()),
            ..row()
        };
        let err = banned.into_bulletin(Censorship::Withhold).unwrap_err();
        assert!(matches!(err, RecordError::Censored { ref txid } if txid.starts_with("b0a1")));
    }

    #[test]
    fn redact_blanks_message_only() {
        let banned = BulletinRow {
            ban_reason: Some("The Beatles are slanderous.".into()),
            ..row()
        };
        let bltn = banned.into_bulletin(Censorship::Redact).unwrap();

        assert_eq!(bltn.message, "");
        assert_eq!(bltn.banned_reason.as_deref(), Some("The Beatles are slanderous."));
        assert_eq!(bltn.author, "mnPZBNTrLoCoSkAgSfKeeCujU3129PG6vn");
        assert!(bltn.is_confirmed());
    }

    #[test]
    fn null_block_drops_block_timestamp() {
        let unconfirmed = BulletinRow {
            block_hash: None,
            block_ts: Some(1),
            board: None,
            ..row()
        };
        let bltn = unconfirmed.into_bulletin(Censorship::Redact).unwrap();

        assert_eq!(bltn.block, None);
        assert_eq!(bltn.blk_timestamp, None);
        assert_eq!(bltn.board, None);
    }

    #[test]
    fn null_hash_is_missing_block() {
        let empty = BlockHeadRow {
            hash: None,
            prevhash: None,
            height: None,
            timestamp: None,
            num_bltns: 0,
        };
        assert!(empty.into_head().is_none());
    }

    #[test]
    fn empty_block_still_has_head() {
        let head = BlockHeadRow {
            hash: Some("00000000efaee711979fe42e667188e50b1096e4d9cfcbc9a82101336189c2ca".into()),
            prevhash: Some("00000000ef99c1e689c70bf2eaddbef5dc41412dfc0c350226d9caa850da307c".into()),
            height: Some(305698),
            timestamp: Some(1414800258),
            num_bltns: 0,
        }
        .into_head()
        .unwrap();

        assert_eq!(head.height, 305698);
        assert_eq!(head.num_bltns, 0);
    }

    #[test]
    fn null_creator_is_missing_board() {
        let nil_row = BoardSummaryRow {
            name: Some(String::new()),
            num_bltns: 0,
            last_active: None,
            created_at: None,
            created_by: None,
        };
        assert!(nil_row.into_summary().is_none());
    }

    #[test]
    fn unconfirmed_board_has_zero_created_at() {
        let summary = BoardSummaryRow {
            name: Some(String::new()),
            num_bltns: 1,
            last_active: Some(1414900834),
            created_at: None,
            created_by: Some("mxmvvxMNaXvPPnU5vHXPoPEsrHbbnSAehh".into()),
        }
        .into_summary()
        .unwrap();

        assert_eq!(summary.created_at, 0);
        assert_eq!(summary.last_active, 1414900834);
    }
}
