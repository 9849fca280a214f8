//! Route handlers organized by resource

pub mod aggregates;
pub mod items;
pub mod status;
