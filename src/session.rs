//! The top-level simulator state.
//!
//! A [`TreasurySession`] exclusively owns the ledger, the transaction log,
//! the transfer form and the history filters. Every user action is one
//! synchronous call on it; derived views (filtered history, totals) are
//! recomputed on each read.

use crate::core::account::Account;
use crate::core::currency::FxRateTable;
use crate::core::ledger::Ledger;
use crate::core::transaction::{Transaction, TransactionLog, TransactionStatus};
use crate::transfer::engine::{TransferEngine, TransferError, TransferQuote};
use crate::transfer::form::{FormField, TransferForm, TransferRequest};
use crate::view::filter::{filter_transactions, FilterError, FilterField, Filters};
use crate::view::format::format_amount;
use crate::view::totals::CurrencyTotals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome text of the most recent submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

impl StatusMessage {
    pub fn for_transaction(tx: &Transaction) -> Self {
        let movement = format!(
            "{} -> {}",
            format_amount(tx.amount(), tx.from_currency()),
            format_amount(tx.converted_amount(), tx.to_currency())
        );
        match (tx.status(), tx.scheduled_date()) {
            (TransactionStatus::Scheduled, Some(date)) => {
                StatusMessage::Success(format!("Transfer scheduled for {}: {}", date, movement))
            }
            _ => StatusMessage::Success(format!("Transfer completed: {}", movement)),
        }
    }

    pub fn for_error(err: &TransferError) -> Self {
        StatusMessage::Error(err.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Success(text) | StatusMessage::Error(text) => text,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[derive(Debug, Clone)]
pub struct TreasurySession {
    ledger: Ledger,
    log: TransactionLog,
    rates: FxRateTable,
    form: TransferForm,
    filters: Filters,
    message: Option<StatusMessage>,
}

impl Default for TreasurySession {
    fn default() -> Self {
        Self::new()
    }
}

impl TreasurySession {
    /// Fresh session over the seed accounts and the standard rate table.
    pub fn new() -> Self {
        Self::with_state(Ledger::seeded(), FxRateTable::standard())
    }

    pub fn with_state(ledger: Ledger, rates: FxRateTable) -> Self {
        Self {
            ledger,
            log: TransactionLog::new(),
            rates,
            form: TransferForm::new(),
            filters: Filters::new(),
            message: None,
        }
    }

    // --- Reads ---

    pub fn accounts(&self) -> &[Account] {
        self.ledger.accounts()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn rates(&self) -> &FxRateTable {
        &self.rates
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.log
    }

    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        filter_transactions(&self.log, &self.filters)
    }

    pub fn currency_totals(&self) -> CurrencyTotals {
        self.ledger.currency_totals()
    }

    pub fn form(&self) -> &TransferForm {
        &self.form
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    // --- Form and filter edits ---

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn set_filter(&mut self, field: FilterField, value: &str) -> Result<(), FilterError> {
        self.filters.set(field, value)
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    // --- Transfers ---

    /// Validate the current form without changing anything.
    pub fn quote(&self) -> Result<TransferQuote, TransferError> {
        TransferEngine::validate(&self.ledger, &self.rates, &self.form.to_request())
    }

    /// Submit the current form, timestamped now.
    pub fn submit(&mut self) -> Result<Transaction, TransferError> {
        self.submit_at(Utc::now())
    }

    /// Submit the current form with an explicit creation timestamp.
    pub fn submit_at(&mut self, now: DateTime<Utc>) -> Result<Transaction, TransferError> {
        let request = self.form.to_request();
        self.submit_request(&request, now)
    }

    /// Execute a request snapshot.
    ///
    /// Success records the transaction, clears the form and sets a success
    /// message. Failure only sets the error message: balances, log and form
    /// are left as they were.
    pub fn submit_request(
        &mut self,
        request: &TransferRequest,
        now: DateTime<Utc>,
    ) -> Result<Transaction, TransferError> {
        match TransferEngine::execute(&mut self.ledger, &mut self.log, &self.rates, request, now) {
            Ok(tx) => {
                self.form.clear();
                self.message = Some(StatusMessage::for_transaction(&tx));
                Ok(tx)
            }
            Err(err) => {
                self.message = Some(StatusMessage::for_error(&err));
                Err(err)
            }
        }
    }
}
