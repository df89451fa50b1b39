//! Money parsing and formatting. Amounts live in the database as integer
//! minor units (cents), never as floats.

use crate::errors::{AppError, AppResult};

/// Parse a user-entered amount like `120`, `120.5` or `120.50` into minor
/// units. At most two decimal digits are accepted.
pub fn parse_amount(s: &str) -> AppResult<i64> {
    let s = s.trim();
    let (neg, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(AppError::InvalidAmount(s.to_string()));
    }
    if frac.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AppError::InvalidAmount(s.to_string()));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| AppError::InvalidAmount(s.to_string()))?
    };
    let cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| AppError::InvalidAmount(s.to_string()))? * 10,
        _ => frac.parse::<i64>().map_err(|_| AppError::InvalidAmount(s.to_string()))?,
    };

    let value = whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or_else(|| AppError::InvalidAmount(s.to_string()))?;
    Ok(if neg { -value } else { value })
}

/// Format minor units as `120.50`.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let a = cents.abs();
    format!("{}{}.{:02}", sign, a / 100, a % 100)
}

/// Format minor units with the configured currency code, `120.50 EUR`.
pub fn format_amount_with(cents: i64, currency: &str) -> String {
    if currency.is_empty() {
        format_amount(cents)
    } else {
        format!("{} {}", format_amount(cents), currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_decimal_amounts() {
        assert_eq!(parse_amount("120").unwrap(), 12000);
        assert_eq!(parse_amount("120.5").unwrap(), 12050);
        assert_eq!(parse_amount("120.50").unwrap(), 12050);
        assert_eq!(parse_amount("0.05").unwrap(), 5);
        assert_eq!(parse_amount("-3.25").unwrap(), -325);
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("12,50").is_err());
        assert!(parse_amount("1.234").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn formats_minor_units() {
        assert_eq!(format_amount(12050), "120.50");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(-325), "-3.25");
        assert_eq!(format_amount_with(20000, "EUR"), "200.00 EUR");
    }
}
