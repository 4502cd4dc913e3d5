//! Foundational types: currencies and rates, accounts, the ledger and the
//! transaction log.

pub mod account;
pub mod currency;
pub mod ledger;
pub mod transaction;
