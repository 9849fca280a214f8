//! Command implementations for the pubrec CLI

pub mod init;
pub mod query;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use init::run_init;
pub use query::run_query;
pub use serve::run_serve;
