//! Author views

use serde::{Deserialize, Serialize};

use super::Bulletin;

/// Posting activity of one author address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    #[serde(rename = "addr")]
    pub address: String,
    pub num_bltns: u64,
    /// Timestamp of the first block that confirmed one of this author's
    /// bulletins. Absent while everything they posted is unconfirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_blk_ts: Option<i64>,
}

/// An author summary with every bulletin they posted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub author: AuthorSummary,
    #[serde(rename = "bltns")]
    pub bulletins: Vec<Bulletin>,
}
