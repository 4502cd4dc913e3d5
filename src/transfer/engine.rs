use crate::core::account::AccountId;
use crate::core::currency::{Currency, FxError, FxRateTable};
use crate::core::ledger::Ledger;
use crate::core::transaction::{NewTransaction, Transaction, TransactionLog};
use crate::transfer::form::{FormField, TransferRequest};
use chrono::{DateTime, Utc};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a transfer is rejected. Each variant has exactly one message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("Please fill in the required field: {0}")]
    MissingField(FormField),
    #[error("Source and destination accounts must be different")]
    SameAccount,
    #[error("Invalid amount '{0}': enter a number greater than zero")]
    InvalidAmount(String),
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),
    #[error("Insufficient balance in {account}: available {balance} {currency}, requested {requested} {currency}")]
    InsufficientBalance {
        account: String,
        currency: Currency,
        balance: Decimal,
        requested: Decimal,
    },
    #[error("Currency conversion {from} -> {to} is not supported")]
    UnsupportedCurrencyPair { from: Currency, to: Currency },
}

impl TransferError {
    /// Stable name of the error kind, for tallies and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            TransferError::MissingField(_) => "MissingField",
            TransferError::SameAccount => "SameAccount",
            TransferError::InvalidAmount(_) => "InvalidAmount",
            TransferError::UnknownAccount(_) => "UnknownAccount",
            TransferError::InsufficientBalance { .. } => "InsufficientBalance",
            TransferError::UnsupportedCurrencyPair { .. } => "UnsupportedCurrencyPair",
        }
    }
}

impl From<FxError> for TransferError {
    fn from(err: FxError) -> Self {
        match err {
            FxError::RateNotFound { from, to } | FxError::InvalidRate { from, to, .. } => {
                TransferError::UnsupportedCurrencyPair { from, to }
            }
        }
    }
}

/// A fully validated transfer: what would move, and at which rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferQuote {
    pub from: AccountId,
    pub to: AccountId,
    pub from_name: String,
    pub to_name: String,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub amount: Decimal,
    pub fx_rate: Decimal,
    pub converted_amount: Decimal,
}

/// Parse a user-entered amount. Plain decimals and scientific notation are
/// accepted; surrounding whitespace is ignored.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Validates and applies transfers against a ledger.
pub struct TransferEngine;

impl TransferEngine {
    /// Run the full validation sequence without touching any state.
    ///
    /// Checks run in a fixed order and the first failure wins:
    ///
    /// 1. source, destination and amount are non-empty
    /// 2. source and destination differ
    /// 3. amount is a positive number
    /// 4. both accounts exist
    /// 5. the source balance covers the amount
    /// 6. a forward rate exists when the currencies differ
    pub fn validate(
        ledger: &Ledger,
        rates: &FxRateTable,
        request: &TransferRequest,
    ) -> Result<TransferQuote, TransferError> {
        if request.from.is_empty() {
            return Err(TransferError::MissingField(FormField::FromAccount));
        }
        if request.to.is_empty() {
            return Err(TransferError::MissingField(FormField::ToAccount));
        }
        if request.amount.is_empty() {
            return Err(TransferError::MissingField(FormField::Amount));
        }

        if request.from == request.to {
            return Err(TransferError::SameAccount);
        }

        let amount = parse_amount(&request.amount)
            .filter(|a| *a > Decimal::ZERO)
            .ok_or_else(|| TransferError::InvalidAmount(request.amount.clone()))?;

        let from_id = AccountId::new(request.from.as_str());
        let to_id = AccountId::new(request.to.as_str());
        let source = ledger
            .get(&from_id)
            .ok_or_else(|| TransferError::UnknownAccount(from_id.clone()))?;
        let destination = ledger
            .get(&to_id)
            .ok_or_else(|| TransferError::UnknownAccount(to_id.clone()))?;

        if source.balance() < amount {
            return Err(TransferError::InsufficientBalance {
                account: source.name().to_string(),
                currency: source.currency(),
                balance: source.balance(),
                requested: amount,
            });
        }

        let fx_rate = rates.get_rate(source.currency(), destination.currency())?;

        Ok(TransferQuote {
            from: from_id,
            to: to_id,
            from_name: source.name().to_string(),
            to_name: destination.name().to_string(),
            from_currency: source.currency(),
            to_currency: destination.currency(),
            amount,
            fx_rate,
            converted_amount: amount * fx_rate,
        })
    }

    /// Validate, move both balances, and record the transaction.
    ///
    /// On error neither the ledger nor the log changes. A scheduled date
    /// marks the transaction as scheduled but does not defer the balance
    /// movement.
    pub fn execute(
        ledger: &mut Ledger,
        log: &mut TransactionLog,
        rates: &FxRateTable,
        request: &TransferRequest,
        now: DateTime<Utc>,
    ) -> Result<Transaction, TransferError> {
        let quote = match Self::validate(ledger, rates, request) {
            Ok(quote) => quote,
            Err(err) => {
                warn!("transfer rejected ({}): {}", err.kind(), err);
                return Err(err);
            }
        };

        if let Err(err) = ledger.settle(&quote.from, &quote.to, quote.amount, quote.converted_amount) {
            warn!("transfer rejected at settlement ({}): {}", err.kind(), err);
            return Err(err);
        }

        let tx = log
            .record(NewTransaction {
                created_at: now,
                from_account: quote.from_name,
                to_account: quote.to_name,
                from_currency: quote.from_currency,
                to_currency: quote.to_currency,
                amount: quote.amount,
                fx_rate: quote.fx_rate,
                note: request.note_text().map(str::to_string),
                scheduled_date: request.scheduled_for().map(str::to_string),
            })
            .clone();

        info!(
            "{} {}: {} {} {} -> {} {} {} (rate {})",
            tx.id(),
            tx.status(),
            tx.from_account(),
            tx.amount(),
            tx.from_currency(),
            tx.to_account(),
            tx.converted_amount(),
            tx.to_currency(),
            tx.fx_rate()
        );
        Ok(tx)
    }
}
