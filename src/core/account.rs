use crate::core::currency::Currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a treasury account.
///
/// Identifiers are what the transfer form carries; display names are what
/// the history view shows and filters on.
///
/// # Examples
///
/// ```
/// use treasury_sim::core::account::AccountId;
///
/// let a = AccountId::new("1");
/// let b = AccountId::new("5");
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this account ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A single-currency treasury account.
///
/// The balance is only reachable mutably through the ledger, which is
/// in turn only mutated by the transfer engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
    currency: Currency,
    balance: Decimal,
}

impl Account {
    /// Create an account.
    ///
    /// # Panics
    ///
    /// Panics if `balance` is negative.
    pub fn new(
        id: impl Into<AccountId>,
        name: impl Into<String>,
        currency: Currency,
        balance: Decimal,
    ) -> Self {
        assert!(
            balance >= Decimal::ZERO,
            "Account balance must be non-negative, got {}",
            balance
        );
        Self {
            id: id.into(),
            name: name.into(),
            currency,
            balance,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub(crate) fn debit(&mut self, amount: Decimal) {
        debug_assert!(amount <= self.balance);
        self.balance -= amount;
    }

    pub(crate) fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The ten demo accounts every session starts from.
pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account::new("1", "Mpesa_KES_1", Currency::Kes, dec!(2_500_000)),
        Account::new("2", "Mpesa_KES_2", Currency::Kes, dec!(1_200_000)),
        Account::new("3", "Bank_KES_1", Currency::Kes, dec!(8_750_000)),
        Account::new("4", "Bank_KES_2", Currency::Kes, dec!(640_000)),
        Account::new("5", "Bank_USD_1", Currency::Usd, dec!(45_000)),
        Account::new("6", "Bank_USD_2", Currency::Usd, dec!(120_000)),
        Account::new("7", "Wallet_USD_1", Currency::Usd, dec!(7_500)),
        Account::new("8", "Bank_NGN_1", Currency::Ngn, dec!(15_000_000)),
        Account::new("9", "Bank_NGN_2", Currency::Ngn, dec!(4_200_000)),
        Account::new("10", "Wallet_NGN_1", Currency::Ngn, dec!(950_000)),
    ]
}
