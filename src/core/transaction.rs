use crate::core::currency::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Sequential transaction identifier, assigned by the log in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TX-{:06}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Scheduled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Scheduled => "Scheduled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded transfer between two accounts.
///
/// Transactions are immutable once created. `converted_amount` is always
/// `amount * fx_rate`, and `fx_rate` is exactly one when both sides share
/// a currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    created_at: DateTime<Utc>,
    from_account: String,
    to_account: String,
    from_currency: Currency,
    to_currency: Currency,
    /// Requested amount, in the source currency.
    amount: Decimal,
    /// Credited amount, in the destination currency.
    converted_amount: Decimal,
    fx_rate: Decimal,
    note: Option<String>,
    /// Informational only: balances were already moved at creation.
    scheduled_date: Option<String>,
    status: TransactionStatus,
}

/// Everything a transaction carries except its identity, which the log assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub created_at: DateTime<Utc>,
    pub from_account: String,
    pub to_account: String,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub amount: Decimal,
    pub fx_rate: Decimal,
    pub note: Option<String>,
    pub scheduled_date: Option<String>,
}

impl Transaction {
    fn from_new(id: TransactionId, new: NewTransaction) -> Self {
        let note = new.note.filter(|n| !n.is_empty());
        let scheduled_date = new.scheduled_date.filter(|d| !d.is_empty());
        let status = if scheduled_date.is_some() {
            TransactionStatus::Scheduled
        } else {
            TransactionStatus::Completed
        };
        Self {
            id,
            created_at: new.created_at,
            from_account: new.from_account,
            to_account: new.to_account,
            from_currency: new.from_currency,
            to_currency: new.to_currency,
            amount: new.amount,
            converted_amount: new.amount * new.fx_rate,
            fx_rate: new.fx_rate,
            note,
            scheduled_date,
            status,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn from_account(&self) -> &str {
        &self.from_account
    }

    pub fn to_account(&self) -> &str {
        &self.to_account
    }

    pub fn from_currency(&self) -> Currency {
        self.from_currency
    }

    pub fn to_currency(&self) -> Currency {
        self.to_currency
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn converted_amount(&self) -> Decimal {
        self.converted_amount
    }

    pub fn fx_rate(&self) -> Decimal {
        self.fx_rate
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn scheduled_date(&self) -> Option<&str> {
        self.scheduled_date.as_deref()
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn involves_currency(&self, currency: Currency) -> bool {
        self.from_currency == currency || self.to_currency == currency
    }
}

/// In-memory transaction history, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionLog {
    entries: VecDeque<Transaction>,
    next_id: u64,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next identifier and put the transaction at the front.
    pub fn record(&mut self, new: NewTransaction) -> &Transaction {
        self.next_id += 1;
        let tx = Transaction::from_new(TransactionId(self.next_id), new);
        self.entries.push_front(tx);
        &self.entries[0]
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
