//! Price conversion between INR and USD using the backend's exchange rate.

use crate::errors::{Error, Result};
use crate::models::Currency;

/// Accepts only finite, positive rates.
///
/// # Errors
/// Returns [`Error::InvalidRate`] for zero, negative, or non-finite rates.
pub fn checked_rate(rate: f64) -> Result<f64> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(Error::InvalidRate { rate })
    }
}

/// Converts `amount` from one currency to the other, unrounded.
///
/// `rate` is rupees per dollar. Same-currency conversion returns `amount` and
/// does not look at the rate.
pub fn convert(amount: f64, from: Currency, to: Currency, rate: f64) -> Result<f64> {
    match (from, to) {
        (Currency::Inr, Currency::Inr) | (Currency::Usd, Currency::Usd) => Ok(amount),
        (Currency::Inr, Currency::Usd) => Ok(amount / checked_rate(rate)?),
        (Currency::Usd, Currency::Inr) => Ok(amount * checked_rate(rate)?),
    }
}

/// Amount as displayed in `to`: dollars with two decimals, rupees rounded to
/// whole units, and an unconverted price as stored.
pub fn display_amount(amount: f64, from: Currency, to: Currency, rate: f64) -> Result<String> {
    let converted = convert(amount, from, to, rate)?;
    Ok(match (from, to) {
        (Currency::Inr, Currency::Usd) => format!("{converted:.2}"),
        (Currency::Usd, Currency::Inr) => format!("{:.0}", converted.round()),
        _ => plain_number(converted),
    })
}

/// Price label with the display currency's symbol, e.g. `₹ 420`.
pub fn display_price(amount: f64, from: Currency, to: Currency, rate: f64) -> Result<String> {
    Ok(format!("{} {}", to.symbol(), display_amount(amount, from, to, rate)?))
}

/// Short revenue figure: two decimals, scaled to K, M, or B from a thousand up.
#[must_use]
pub fn compact_amount(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude < 1e3 {
        format!("{value:.2}")
    } else if magnitude < 1e6 {
        format!("{:.2}K", value / 1e3)
    } else if magnitude < 1e9 {
        format!("{:.2}M", value / 1e6)
    } else {
        format!("{:.2}B", value / 1e9)
    }
}

/// Renders whole numbers without a fractional part.
pub(crate) fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
