use crate::core::account::{seed_accounts, Account, AccountId};
use crate::transfer::engine::TransferError;
use crate::view::format::format_amount;
use crate::view::totals::CurrencyTotals;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current balances of the fixed account set.
///
/// The account list is frozen at construction: accounts are never added or
/// removed afterwards, only their balances move, and only in debit/credit
/// pairs through [`Ledger::settle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    accounts: Vec<Account>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Ledger {
    /// Build a ledger from an explicit account list.
    ///
    /// # Panics
    ///
    /// Panics if two accounts share an identifier.
    pub fn new(accounts: Vec<Account>) -> Self {
        for (i, account) in accounts.iter().enumerate() {
            assert!(
                accounts[..i].iter().all(|a| a.id() != account.id()),
                "Duplicate account id {}",
                account.id()
            );
        }
        Self { accounts }
    }

    /// Ledger over the ten demo accounts.
    pub fn seeded() -> Self {
        Self::new(seed_accounts())
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    pub fn balance(&self, id: &AccountId) -> Option<Decimal> {
        self.get(id).map(Account::balance)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Debit `debit` from `from` and credit `credit` to `to`.
    ///
    /// Both accounts are resolved and the debit is checked against the
    /// source balance before either balance moves, so an error leaves the
    /// ledger untouched.
    pub(crate) fn settle(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        debit: Decimal,
        credit: Decimal,
    ) -> Result<(), TransferError> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        if from_idx == to_idx {
            return Err(TransferError::SameAccount);
        }
        let source = &self.accounts[from_idx];
        if source.balance() < debit {
            return Err(TransferError::InsufficientBalance {
                account: source.name().to_string(),
                currency: source.currency(),
                balance: source.balance(),
                requested: debit,
            });
        }
        self.accounts[from_idx].debit(debit);
        self.accounts[to_idx].credit(credit);
        Ok(())
    }

    fn index_of(&self, id: &AccountId) -> Result<usize, TransferError> {
        self.accounts
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| TransferError::UnknownAccount(id.clone()))
    }

    /// Sum of balances per currency over every account.
    pub fn currency_totals(&self) -> CurrencyTotals {
        CurrencyTotals::from_accounts(&self.accounts)
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Accounts ===")?;
        for account in &self.accounts {
            writeln!(
                f,
                "  {:>3}  {:<14} {:>24}",
                account.id(),
                account.name(),
                format_amount(account.balance(), account.currency())
            )?;
        }
        Ok(())
    }
}
