//! pubrec-core: read-only query layer over the bulletin public record
//!
//! The store holds three tables written by an external chain indexer:
//! `blocks`, `bulletins` and `blacklist`. This crate reconciles authorship,
//! block confirmation and censorship per bulletin and computes the board,
//! author, block and freshness aggregates served by the API.
//!
//! [`PublicRecord`] is the only entry point adapters need.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod record;

pub use config::StoreConfig;
pub use error::{RecordError, Result};
pub use record::PublicRecord;
