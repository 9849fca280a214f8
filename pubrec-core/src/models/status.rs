//! Store freshness

use serde::{Deserialize, Serialize};

/// Latest self-reported block and bulletin timestamps.
///
/// Both values are gameable by whoever writes the timestamps; this is only
/// a heuristic for whether the indexer is still writing. Fields are absent
/// on an empty store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freshness {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_blk: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_bltn: Option<i64>,
}
