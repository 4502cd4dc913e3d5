//! # treasury-sim
//!
//! In-memory multi-currency treasury transfer simulator.
//!
//! Ten demo accounts in KES, USD and NGN, a static FX rate table, and a
//! single session object that validates transfers, moves balances, and keeps
//! a filterable newest-first transaction history. Nothing is persisted.
//!
//! ## Architecture
//!
//! - **core** — Currencies and FX rates, accounts, the ledger, the transaction log
//! - **transfer** — The transfer form, request snapshots, and the validating engine
//! - **view** — History filtering, currency totals, amount formatting
//! - **session** — The single owner of all mutable state
//! - **simulation** — Random transfer traffic

pub mod core;
pub mod session;
pub mod simulation;
pub mod transfer;
pub mod view;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::account::{Account, AccountId};
    pub use crate::core::currency::{Currency, FxRateTable};
    pub use crate::core::ledger::Ledger;
    pub use crate::core::transaction::{Transaction, TransactionStatus};
    pub use crate::session::{StatusMessage, TreasurySession};
    pub use crate::transfer::engine::{TransferEngine, TransferError};
    pub use crate::transfer::form::{FormField, TransferForm, TransferRequest};
    pub use crate::view::filter::{FilterField, Filters};
    pub use crate::view::totals::CurrencyTotals;
}
