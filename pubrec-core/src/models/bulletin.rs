//! Bulletin views

use serde::{Deserialize, Serialize};

/// A bulletin as returned to callers.
///
/// Optional fields are omitted from JSON when absent. A bulletin without
/// `block` is unconfirmed. A bulletin with `banned_reason` appears only
/// inside lists, with `message` blanked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bulletin {
    pub txid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    pub author: String,
    #[serde(rename = "msg")]
    pub message: String,
    pub timestamp: i64,
    #[serde(rename = "blk", default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blk_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banned_reason: Option<String>,
}

impl Bulletin {
    pub fn is_confirmed(&self) -> bool {
        self.block.is_some()
    }

    pub fn is_censored(&self) -> bool {
        self.banned_reason.is_some()
    }
}

/// An entry of the administrative blacklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedBulletin {
    pub txid: String,
    pub reason: String,
}
