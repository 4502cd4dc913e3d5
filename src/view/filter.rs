use crate::core::currency::{Currency, CurrencyError};
use crate::core::transaction::{Transaction, TransactionLog};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Date format accepted by the date filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter inputs of the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Account,
    Currency,
    DateFrom,
    DateTo,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Account => "account",
            FilterField::Currency => "currency",
            FilterField::DateFrom => "date-from",
            FilterField::DateTo => "date-to",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account" => Ok(FilterField::Account),
            "currency" => Ok(FilterField::Currency),
            "date-from" | "from" => Ok(FilterField::DateFrom),
            "date-to" | "to" => Ok(FilterField::DateTo),
            other => Err(FilterError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown filter '{0}' (expected account, currency, date-from or date-to)")]
    UnknownField(String),
    #[error(transparent)]
    Currency(#[from] CurrencyError),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Active history filters. An unset field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Substring of either account's display name. Case-sensitive.
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Inclusive from the start of this day (UTC).
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive through 23:59:59 of this day (UTC).
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter from user text. An empty value clears the field.
    ///
    /// On error the previous value is kept.
    pub fn set(&mut self, field: FilterField, value: &str) -> Result<(), FilterError> {
        let value = value.trim();
        match field {
            FilterField::Account => self.account = value.to_string(),
            FilterField::Currency => {
                self.currency = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                }
            }
            FilterField::DateFrom => self.date_from = parse_date(value)?,
            FilterField::DateTo => self.date_to = parse_date(value)?,
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True iff every populated field matches.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if !self.account.is_empty()
            && !tx.from_account().contains(&self.account)
            && !tx.to_account().contains(&self.account)
        {
            return false;
        }

        if let Some(currency) = self.currency {
            if !tx.involves_currency(currency) {
                return false;
            }
        }

        let created = tx.created_at();
        if let Some(from) = self.date_from {
            if created.date_naive() < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            let within = to
                .and_hms_opt(23, 59, 59)
                .is_some_and(|end| created.naive_utc() <= end);
            if !within {
                return false;
            }
        }

        true
    }
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, FilterError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FilterError::InvalidDate(value.to_string()))
}

/// Transactions matching `filters`, in log order (newest first).
pub fn filter_transactions<'a>(log: &'a TransactionLog, filters: &Filters) -> Vec<&'a Transaction> {
    let matched: Vec<&Transaction> = log.iter().filter(|tx| filters.matches(tx)).collect();
    debug!(
        "history filter {:?} matched {} of {} transactions",
        filters,
        matched.len(),
        log.len()
    );
    matched
}
