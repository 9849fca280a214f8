//! Block views

use serde::{Deserialize, Serialize};

use super::Bulletin;

/// Summary of a single block and how many bulletins it confirmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHead {
    pub hash: String,
    /// Absent for the genesis block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_hash: Option<String>,
    pub timestamp: i64,
    pub height: u64,
    pub num_bltns: u64,
}

/// A block head with the bulletins it confirmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResponse {
    pub head: BlockHead,
    #[serde(rename = "bltns")]
    pub bulletins: Vec<Bulletin>,
}
