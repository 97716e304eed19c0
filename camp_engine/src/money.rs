//! Precision-safe money arithmetic.
//!
//! Amounts are [`Decimal`]s.  Every function returning an amount
//! rounds the result to two fractional digits with round-half-to-even,
//! so midpoint ties do not bias totals upward over many transactions.
//! Multi-operand sums are computed in full precision and rounded once
//! at the end.
//!
//! Negative inputs are accepted and propagate arithmetically; range
//! checks on amounts and rates are the caller's business.  Results
//! beyond the range of [`Decimal`] saturate at `Decimal::MAX` or
//! `Decimal::MIN` instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};

pub const PRECISION: u32 = 2;

/// Default tolerance for [`equals`]: one hundredth of the currency unit.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn round(amount: Decimal) -> Decimal {
    round_dp(amount, PRECISION)
}

pub fn round_dp(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven)
}

/// `amount × rate / 100`, rounded.
pub fn percentage(amount: Decimal, rate: Decimal) -> Decimal {
    round(amount.saturating_mul(rate / HUNDRED))
}

pub fn add<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round(
        amounts
            .into_iter()
            .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount)),
    )
}

/// `base` minus every amount in `amounts`, rounded once.
pub fn subtract<I>(base: Decimal, amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round(
        amounts
            .into_iter()
            .fold(base, |acc, amount| acc.saturating_sub(amount)),
    )
}

pub fn equals(a: Decimal, b: Decimal) -> bool {
    equals_within(a, b, DEFAULT_TOLERANCE)
}

/// Absolute-difference comparison; true when `|a - b| < tolerance`.
pub fn equals_within(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    a.checked_sub(b)
        .is_some_and(|difference| difference.abs() < tolerance)
}

/// Whole-unit display string with thousands separators, e.g. `1,234,567`.
pub fn format(amount: Decimal) -> String {
    format_with(amount, 0)
}

pub fn format_with(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
