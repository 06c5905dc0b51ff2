//! Cart line items and price parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest decimal literal at the start of the input: optional sign, digits
/// with an optional fraction (or a bare fraction), optional exponent.
///
/// Digits are ASCII only; `\d` would also match other Unicode decimal digits.
static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // literal pattern
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name of the product.
    pub name: String,
    /// Unit price in the store currency.
    pub price: f64,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Whether this item takes part in totals and the rendered list.
    #[must_use]
    pub const fn has_valid_price(&self) -> bool {
        self.price.is_finite()
    }
}

/// Reasons a raw price string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// No price was supplied, or it was blank.
    #[error("price is missing or empty")]
    Missing,

    /// The text does not start with a decimal number.
    #[error("price {0:?} is not a number")]
    NotANumber(String),

    /// The number overflows to infinity.
    #[error("price {0:?} is not finite")]
    NotFinite(String),

    /// Prices cannot be negative.
    #[error("price {0:?} is negative")]
    Negative(String),
}

/// Parse a raw price attribute into a number.
///
/// Leading whitespace is skipped and the longest decimal prefix is used, so
/// `"12.50 USD"` parses as `12.5`. Anything after the prefix is ignored.
/// Negative zero is accepted and normalized to `0.0`.
///
/// # Errors
///
/// Returns [`PriceError`] when the input is absent or blank, has no numeric
/// prefix, overflows, or is negative.
pub fn parse_price(raw: Option<&str>) -> Result<f64, PriceError> {
    let raw = raw.ok_or(PriceError::Missing)?;
    let trimmed = raw.trim_start();
    if trimmed.trim_end().is_empty() {
        return Err(PriceError::Missing);
    }

    let literal = DECIMAL_PREFIX
        .find(trimmed)
        .map(|m| m.as_str())
        .ok_or_else(|| PriceError::NotANumber(raw.to_owned()))?;

    let price: f64 = literal
        .parse()
        .map_err(|_| PriceError::NotANumber(raw.to_owned()))?;

    if !price.is_finite() {
        return Err(PriceError::NotFinite(raw.to_owned()));
    }
    if price < 0.0 {
        return Err(PriceError::Negative(raw.to_owned()));
    }

    // `-0` survives the check above; drop its sign so it renders as `$0.00`.
    Ok(price.abs())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimals() {
        assert_eq!(parse_price(Some("19.99")).unwrap(), 19.99);
        assert_eq!(parse_price(Some("5")).unwrap(), 5.0);
        assert_eq!(parse_price(Some("0")).unwrap(), 0.0);
        assert_eq!(parse_price(Some(".5")).unwrap(), 0.5);
        assert_eq!(parse_price(Some("2.")).unwrap(), 2.0);
        assert_eq!(parse_price(Some("1e2")).unwrap(), 100.0);
    }

    #[test]
    fn test_parse_uses_leading_numeric_prefix() {
        assert_eq!(parse_price(Some("  7.25")).unwrap(), 7.25);
        assert_eq!(parse_price(Some("12abc")).unwrap(), 12.0);
        assert_eq!(parse_price(Some("3.5 USD")).unwrap(), 3.5);
        assert_eq!(parse_price(Some("4e")).unwrap(), 4.0);
    }

    #[test]
    fn test_parse_missing_or_blank() {
        assert_eq!(parse_price(None), Err(PriceError::Missing));
        assert_eq!(parse_price(Some("")), Err(PriceError::Missing));
        assert_eq!(parse_price(Some("   ")), Err(PriceError::Missing));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(matches!(
            parse_price(Some("abc")),
            Err(PriceError::NotANumber(_))
        ));
        assert!(matches!(
            parse_price(Some("$5")),
            Err(PriceError::NotANumber(_))
        ));
        assert!(matches!(
            parse_price(Some("Infinity")),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_rejects_overflow_and_negative() {
        assert!(matches!(
            parse_price(Some("1e400")),
            Err(PriceError::NotFinite(_))
        ));
        assert!(matches!(
            parse_price(Some("-3")),
            Err(PriceError::Negative(_))
        ));
        assert!(matches!(
            parse_price(Some("-0.001")),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_parse_negative_zero_is_zero() {
        for raw in ["-0", "-0.00", " -0e5"] {
            let price = parse_price(Some(raw)).unwrap();
            assert_eq!(price, 0.0);
            assert!(price.is_sign_positive(), "{raw:?} kept its sign");
        }
    }

    #[test]
    fn test_parse_only_ascii_digits() {
        // U+0663 ARABIC-INDIC DIGIT THREE
        assert_eq!(parse_price(Some("5\u{0663}")).unwrap(), 5.0);
        assert_eq!(parse_price(Some("1.5\u{0663}")).unwrap(), 1.5);
        assert!(matches!(
            parse_price(Some("\u{0663}")),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_line_item_validity() {
        assert!(LineItem::new("Widget", 1.0).has_valid_price());
        assert!(!LineItem::new("Broken", f64::NAN).has_valid_price());
        assert!(!LineItem::new("Broken", f64::INFINITY).has_valid_price());
    }
}
