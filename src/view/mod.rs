//! Read-only views over session state: history filtering, currency totals
//! and display formatting.

pub mod filter;
pub mod format;
pub mod totals;
