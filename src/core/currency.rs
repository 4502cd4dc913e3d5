use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currencies a treasury account can be denominated in.
///
/// The set is closed: every account and every rate in the simulator uses
/// one of these three codes.
///
/// # Examples
///
/// ```
/// use treasury_sim::core::currency::Currency;
///
/// let kes: Currency = "KES".parse().unwrap();
/// assert_eq!(kes, Currency::Kes);
/// assert_eq!(kes.to_string(), "KES");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Kes,
    Usd,
    Ngn,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Kes, Currency::Usd, Currency::Ngn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Kes => "KES",
            Currency::Usd => "USD",
            Currency::Ngn => "NGN",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency code '{0}' (expected KES, USD or NGN)")]
pub struct CurrencyError(pub String);

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KES" => Ok(Currency::Kes),
            "USD" => Ok(Currency::Usd),
            "NGN" => Ok(Currency::Ngn),
            _ => Err(CurrencyError(s.to_string())),
        }
    }
}

/// Errors arising from FX rate operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FxError {
    #[error("no FX rate available for {from} -> {to}")]
    RateNotFound { from: Currency, to: Currency },
    #[error("FX rate must be positive, got {rate} for {from} -> {to}")]
    InvalidRate {
        from: Currency,
        to: Currency,
        rate: Decimal,
    },
}

/// An ordered currency pair: rates are quoted from `base` into `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Static FX rate table.
///
/// Only forward rates are stored and no inverse is ever derived: a pair
/// that was never set is unsupported, even when its reverse direction
/// is present.
///
/// # Examples
///
/// ```
/// use treasury_sim::core::currency::{Currency, FxRateTable};
/// use rust_decimal_macros::dec;
///
/// let rates = FxRateTable::standard();
/// let converted = rates.convert(dec!(100000), Currency::Kes, Currency::Usd).unwrap();
/// assert_eq!(converted, dec!(670));
///
/// assert!(rates.convert(dec!(1), Currency::Kes, Currency::Ngn).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FxRateTable {
    rates: HashMap<CurrencyPair, Decimal>,
}

impl FxRateTable {
    /// An empty table: only same-currency conversion succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// The three rates the simulator ships with.
    pub fn standard() -> Self {
        let mut rates = HashMap::new();
        rates.insert(CurrencyPair::new(Currency::Kes, Currency::Usd), dec!(0.0067));
        rates.insert(CurrencyPair::new(Currency::Usd, Currency::Kes), dec!(149.25));
        rates.insert(CurrencyPair::new(Currency::Ngn, Currency::Usd), dec!(0.00065));
        Self { rates }
    }

    /// Set a forward rate: 1 unit of `from` = `rate` units of `to`.
    pub fn set_rate(&mut self, from: Currency, to: Currency, rate: Decimal) -> Result<(), FxError> {
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate { from, to, rate });
        }
        self.rates.insert(CurrencyPair::new(from, to), rate);
        Ok(())
    }

    /// Rate for the ordered pair. Exactly one for identical currencies.
    pub fn get_rate(&self, from: Currency, to: Currency) -> Result<Decimal, FxError> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        let rate = self
            .rates
            .get(&CurrencyPair::new(from, to))
            .copied()
            .ok_or(FxError::RateNotFound { from, to });
        debug!("fx lookup {}/{}: {:?}", from, to, rate);
        rate
    }

    /// Convert an amount from one currency to another.
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Decimal, FxError> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.get_rate(from, to)?;
        Ok(amount * rate)
    }

    pub fn is_supported(&self, from: Currency, to: Currency) -> bool {
        self.get_rate(from, to).is_ok()
    }

    /// All stored pairs with their rates, sorted by pair.
    pub fn pairs(&self) -> Vec<(CurrencyPair, Decimal)> {
        let mut pairs: Vec<_> = self.rates.iter().map(|(p, r)| (*p, *r)).collect();
        pairs.sort_by_key(|(pair, _)| *pair);
        pairs
    }
}
