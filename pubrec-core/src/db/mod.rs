//! Database layer - pool, schema, prepared queries, row mapping
//!
//! # Design Principles
//!
//! - Read-only: nothing in this layer writes to the store
//! - One prepared statement per lookup, compiled once at startup
//! - Aggregates and their bulletin lists are separate single queries
//! - Nullable columns stay `Option` until the row mapper decides

pub mod assemble;
pub mod pool;
pub mod queries;
pub mod rows;
pub mod schema;

pub use pool::create_pool;
pub use queries::Statements;
pub use rows::Censorship;
