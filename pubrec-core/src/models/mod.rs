//! Response records
//!
//! These are the typed shapes the facade returns. Their serde attributes
//! define the JSON served by the HTTP adapter: camelCase keys, and
//! optional fields omitted rather than emitted as `null`.

pub mod author;
pub mod block;
pub mod board;
pub mod bulletin;
pub mod day;
pub mod status;

pub use author::{AuthorResponse, AuthorSummary};
pub use block::{BlockHead, BlockResponse};
pub use board::{BoardName, BoardSummary, WholeBoard};
pub use bulletin::{BannedBulletin, Bulletin};
pub use day::Day;
pub use status::Freshness;
