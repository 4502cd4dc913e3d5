use crate::core::currency::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

/// Render a decimal with two places and thousands separators.
///
/// ```
/// use treasury_sim::view::format::format_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_decimal(dec!(2400000)), "2,400,000.00");
/// assert_eq!(format_decimal(dec!(-1234.565)), "-1,234.57");
/// ```
pub fn format_decimal(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}.{}", grouped, frac_part)
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

/// `"<CCY> 1,234.56"`.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    format!("{} {}", currency, format_decimal(amount))
}
