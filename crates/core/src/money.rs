//! Money - rounding and formatting of monetary values
//!
//! All amounts are `rust_decimal::Decimal`. Debt figures are rounded to
//! cents with banker's rounding at exactly two points: when a loan's total
//! debt is fixed and when outstanding debt is derived from it.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for monetary values (cents)
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary value to cents, half to even.
///
/// # Example
/// ```
/// use lendbook_core::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1234, 2)); // 12.345 -> 12.34
/// assert_eq!(round_money(Decimal::new(12355, 3)), Decimal::new(1236, 2)); // 12.355 -> 12.36
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    round_money_with(value, MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

fn round_money_with(value: Decimal, scale: u32, strategy: RoundingStrategy) -> Decimal {
    value.round_dp_with_strategy(scale, strategy)
}

/// Format an amount as currency with thousands separators, e.g. `$1,234.56`
pub fn format_currency(value: Decimal, symbol: &str) -> String {
    let mut rounded = round_money(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(MONEY_SCALE);

    let text = rounded.to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        cents
    )
}

/// Format a fractional rate as a percentage with one decimal, e.g. `0.1` -> `10.0%`
///
/// Rates too large to scale by 100 are printed as the raw fraction.
pub fn format_rate(rate: Decimal) -> String {
    match rate.checked_mul(Decimal::ONE_HUNDRED) {
        Some(percent) => {
            let mut percent = percent.round_dp(1);
            percent.rescale(1);
            format!("{}%", percent)
        }
        None => rate.to_string(),
    }
}
