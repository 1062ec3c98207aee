use std::sync::LazyLock;

use regex::Regex;
use tradein_core::Price;

/// First run of digits, optionally grouped with thousands commas.
static PRICE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:,\d+)*").expect("valid price regex"));

/// Extracts the quoted amount from displayed price text.
///
/// `"1,202 AED"` becomes `Price::Amount(1202)`. Text with no digits (or an
/// amount too large for `i64`) passes through unchanged as `Price::Text`.
#[must_use]
pub fn extract_numerical_price(text: &str) -> Price {
    PRICE_DIGITS
        .find(text)
        .and_then(|m| m.as_str().replace(',', "").parse::<i64>().ok())
        .map_or_else(|| Price::Text(text.to_string()), Price::Amount)
}
