//! Budget amount helpers
//!
//! Ledger slots carry decimal strings on the wire. The zero-default policy
//! for missing or garbage values lives in [`parse_amount_or_zero`] so it is
//! visible and testable in one place.

/// Parse a slot value, treating missing or non-numeric input as zero
#[inline]
#[must_use]
pub fn parse_amount_or_zero(value: Option<&str>) -> f64 {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Shortest stable decimal rendering (`300`, `300.5`)
#[inline]
#[must_use]
pub fn format_plain(amount: f64) -> String {
    amount.to_string()
}

/// Two-fraction-digit rendering (`450.00`)
#[inline]
#[must_use]
pub fn format_fixed(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_garbage_are_zero() {
        assert_eq!(parse_amount_or_zero(None), 0.0);
        assert_eq!(parse_amount_or_zero(Some("")), 0.0);
        assert_eq!(parse_amount_or_zero(Some("abc")), 0.0);
        assert_eq!(parse_amount_or_zero(Some(" 120.50 ")), 120.5);
    }

    #[test]
    fn plain_format_drops_trailing_zeroes() {
        assert_eq!(format_plain(300.0), "300");
        assert_eq!(format_plain(300.5), "300.5");
        assert_eq!(format_plain(0.0), "0");
    }

    #[test]
    fn fixed_format_keeps_two_digits() {
        assert_eq!(format_fixed(450.0), "450.00");
        assert_eq!(format_fixed(0.0), "0.00");
        assert_eq!(format_fixed(1450.0), "1450.00");
    }
}
