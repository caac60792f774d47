//! Validation of user-entered amounts.
//!
//! Amounts are rejected here, before any calculator runs; the bracket walk
//! itself never sees malformed input.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// An optional currency symbol, then either comma-grouped or plain digits,
/// then an optional fraction.
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[$£]?(\d{1,3}(,\d{3})+|\d+)(\.\d+)?$").expect("amount pattern is valid")
});

#[derive(Debug, Error, PartialEq)]
pub enum ParseAmountError {
    #[error("amount is required")]
    Empty,

    #[error("amount must not be negative, got '{0}'")]
    Negative(String),

    #[error("'{0}' is not a valid amount")]
    Malformed(String),

    #[error("'{input}' is out of range: {source}")]
    OutOfRange {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Normalizes input for decimal parsing: trims whitespace, drops the currency
/// symbol and thousands separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim()
        .trim_start_matches(['$', '£'])
        .replace(',', "")
}

/// Parses a non-negative money amount.
///
/// Accepts an optional leading `$` or `£` and comma thousands separators
/// (`"$1,234.56"`). Empty, negative and malformed input is an error.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    if trimmed.starts_with('-') {
        tracing::warn!(input = %s, "negative amount rejected");
        return Err(ParseAmountError::Negative(trimmed.to_string()));
    }
    if !AMOUNT_PATTERN.is_match(trimmed) {
        tracing::warn!(input = %s, "malformed amount rejected");
        return Err(ParseAmountError::Malformed(trimmed.to_string()));
    }

    normalize_amount_input(trimmed)
        .parse::<Decimal>()
        .map_err(|source| ParseAmountError::OutOfRange {
            input: trimmed.to_string(),
            source,
        })
}
