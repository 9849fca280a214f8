//! Compound responses built from a head row plus its bulletin rows
//!
//! Bulletins inside any compound response are always redacted rather than
//! withheld. Row order is kept exactly as the query produced it.

use super::rows::{BulletinRow, Censorship};
use crate::error::Result;
use crate::models::{
    AuthorResponse, AuthorSummary, BlockHead, BlockResponse, BoardSummary, Bulletin, WholeBoard,
};

/// Map list rows, redacting banned bulletins.
pub fn bulletin_list(rows: Vec<BulletinRow>) -> Result<Vec<Bulletin>> {
    rows.into_iter()
        .map(|row| row.into_bulletin(Censorship::Redact))
        .collect()
}

pub fn block_response(head: BlockHead, rows: Vec<BulletinRow>) -> Result<BlockResponse> {
    Ok(BlockResponse {
        head,
        bulletins: bulletin_list(rows)?,
    })
}

pub fn whole_board(summary: BoardSummary, rows: Vec<BulletinRow>) -> Result<WholeBoard> {
    Ok(WholeBoard {
        summary,
        bulletins: bulletin_list(rows)?,
    })
}

pub fn author_response(author: AuthorSummary, rows: Vec<BulletinRow>) -> Result<AuthorResponse> {
    Ok(AuthorResponse {
        author,
        bulletins: bulletin_list(rows)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(txid: &str, ts: i64, banned: bool) -> BulletinRow {
        BulletinRow {
            txid: txid.into(),
            author: "miUDcP8obUKPhqkrBrQz57sbSg2Mz1kZXH".into(),
            board: Some("ahimsa-dev".into()),
            message: format!("message {}", txid),
            bltn_ts: ts,
            block_hash: None,
            block_ts: None,
            ban_reason: banned.then(|| "spam".to_string()),
        }
    }

    #[test]
    fn list_keeps_order_and_redacts() {
        let rows = vec![row("c", 3, false), row("a", 1, true), row("b", 2, false)];
        let bltns = bulletin_list(rows).unwrap();

        let txids: Vec<_> = bltns.iter().map(|b| b.txid.as_str()).collect();
        assert_eq!(txids, ["c", "a", "b"]);
        assert_eq!(bltns[1].message, "");
        assert_eq!(bltns[1].banned_reason.as_deref(), Some("spam"));
        assert_eq!(bltns[2].message, "message b");
    }

    #[test]
    fn author_response_wraps_summary() {
        let summary = AuthorSummary {
            address: "miUDcP8obUKPhqkrBrQz57sbSg2Mz1kZXH".into(),
            num_bltns: 2,
            first_blk_ts: Some(1414017952),
        };
        let resp = author_response(summary, vec![row("a", 1, false), row("b", 2, true)]).unwrap();

        assert_eq!(resp.author.num_bltns, 2);
        assert_eq!(resp.bulletins.len(), 2);
        assert!(resp.bulletins[1].is_censored());
    }
}
