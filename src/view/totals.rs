use crate::core::account::Account;
use crate::core::currency::Currency;
use crate::view::format::format_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Balance totals per currency, for the dashboard.
///
/// Only currencies held by at least one account are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTotals(BTreeMap<Currency, Decimal>);

impl CurrencyTotals {
    pub fn from_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        let mut totals = BTreeMap::new();
        for account in accounts {
            *totals.entry(account.currency()).or_insert(Decimal::ZERO) += account.balance();
        }
        Self(totals)
    }

    pub fn get(&self, currency: Currency) -> Option<Decimal> {
        self.0.get(&currency).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<Currency, Decimal> {
        self.0
    }
}

impl fmt::Display for CurrencyTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Currency Totals ===")?;
        for (currency, total) in self.iter() {
            writeln!(f, "  {:>24}", format_amount(total, currency))?;
        }
        Ok(())
    }
}
