//! Prices
//!
//! Every amount in the catalog and the cart is held as integer minor units of a
//! single ISO currency. Decimal text and JSON numbers only appear at the edges:
//! catalog parsing, display formatting and the wire format of the order API.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

/// An amount of money in a catalog currency.
pub type Price = Money<'static, Currency>;

/// Errors raised while parsing a [`Price`] from text.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The text was not of the form `AMOUNT CURRENCY`.
    #[error("expected format 'AMOUNT CURRENCY', got: {0}")]
    Format(String),

    /// The amount could not be parsed as a decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The currency code is not a known ISO currency.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The amount does not fit into minor units.
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Look up an ISO currency by its alpha code (e.g. `CNY`).
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] when the code is not recognised.
pub fn find_currency(code: &str) -> Result<&'static Currency, PriceError> {
    Currency::find(code).ok_or_else(|| PriceError::UnknownCurrency(code.to_string()))
}

/// Parse a price string (e.g. `"35.00 CNY"`) into a [`Price`].
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, if the
/// amount cannot be parsed as a decimal, or if the currency code is not
/// recognised.
pub fn parse_price(s: &str) -> Result<Price, PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(PriceError::Format(s.to_string()));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidAmount(s.to_string()))?;

    let currency = find_currency(code)?;

    let minor_units =
        to_minor_units(amount, currency).ok_or_else(|| PriceError::OutOfRange(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Convert a [`Price`] into the JSON number sent over the order API.
pub fn to_wire_amount(price: &Price) -> f64 {
    decimal_amount(price).to_f64().unwrap_or_default()
}

/// Format a price as a plain decimal with the currency's precision, e.g. `"90.00"`.
pub fn format_amount(price: &Price) -> String {
    let precision = price.currency().exponent as usize;

    format!("{:.precision$}", decimal_amount(price))
}

/// Multiply a unit price by a quantity.
pub fn times(price: &Price, quantity: u32) -> Price {
    Money::from_minor(
        price.to_minor_units() * i64::from(quantity),
        price.currency(),
    )
}

fn decimal_amount(price: &Price) -> Decimal {
    Decimal::new(price.to_minor_units(), price.currency().exponent)
}

fn to_minor_units(amount: Decimal, currency: &Currency) -> Option<i64> {
    let factor = 10_i64.checked_pow(currency.exponent)?;

    amount
        .checked_mul(Decimal::from(factor))
        .and_then(|value| value.round_dp(0).to_i64())
}
