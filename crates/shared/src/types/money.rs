//! Fixed-point money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` with at most two fractional digits;
//! the ledger runs in a single currency so no currency tag is carried.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of fractional digits an amount may carry.
pub const MONEY_SCALE: u32 = 2;

/// Largest magnitude accepted from user input (exclusive).
fn max_input_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Errors produced while reading an amount from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The text is not a decimal number.
    #[error("'{0}' is not a valid amount")]
    Malformed(String),
    /// More fractional digits than the ledger stores.
    #[error("Amount can have at most {MONEY_SCALE} decimal places")]
    TooManyDecimals,
    /// Magnitude beyond what an account can hold.
    #[error("Amount is out of range")]
    OutOfRange,
}

/// Parses a user supplied amount such as `"150"` or `"12.50"`.
///
/// The sign is preserved; rejecting negative values is a business rule
/// owned by the operation validators.
///
/// # Errors
///
/// Returns `MoneyError` when the text is not a plain decimal, carries more
/// than two fractional digits, or is implausibly large.
pub fn parse_amount(input: &str) -> Result<Decimal, MoneyError> {
    let trimmed = input.trim();
    let amount =
        Decimal::from_str(trimmed).map_err(|_| MoneyError::Malformed(trimmed.to_string()))?;

    if amount.normalize().scale() > MONEY_SCALE {
        return Err(MoneyError::TooManyDecimals);
    }
    if amount.abs() >= max_input_amount() {
        return Err(MoneyError::OutOfRange);
    }

    Ok(amount)
}

/// Returns `amount` carrying exactly two fractional digits (`50` becomes `50.00`).
#[must_use]
pub fn at_money_scale(amount: Decimal) -> Decimal {
    let mut scaled = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    scaled.rescale(MONEY_SCALE);
    scaled
}

/// Renders an amount with thousands separators and two decimals (`1,234.50`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}
