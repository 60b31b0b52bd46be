//! Normalization and display helpers shared by the gateway and the shell.
//!
//! Every helper here maps a missing or degenerate value to a printable
//! default so nothing upstream-shaped leaks into a rendered line.

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN: &str = "Unknown";

/// Share of `supply` held by `amount`, in percent. A zero (or non-finite)
/// supply yields 0 rather than a division fault.
pub fn holder_percentage(amount: f64, supply: f64) -> f64 {
    if !supply.is_finite() || supply <= 0.0 || !amount.is_finite() {
        return 0.0;
    }
    (amount / supply) * 100.0
}

/// `$1.23` when a non-zero price is present, `N/A` otherwise.
pub fn format_usd_price(price: Option<f64>) -> String {
    match usable(price) {
        Some(p) => format!("${:.2}", p),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `$1,234,567.891` when a non-zero volume is present, `N/A` otherwise.
/// At most three fractional digits are kept and trailing zeros dropped.
pub fn format_usd_volume(volume: Option<f64>) -> String {
    match usable(volume) {
        Some(v) => format!("${}", group_thousands(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Trimmed, non-empty text or the given fallback.
pub fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holder_percentage_zero_supply() {
        assert_eq!(holder_percentage(600_000.0, 0.0), 0.0);
        assert_eq!(holder_percentage(0.0, 0.0), 0.0);
        assert_eq!(holder_percentage(5.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_holder_percentage_regular() {
        assert_eq!(format!("{:.2}", holder_percentage(600_000.0, 1_000_000.0)), "60.00");
        assert_eq!(format!("{:.2}", holder_percentage(1.0, 3.0)), "33.33");
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_usd_price(Some(1.2345)), "$1.23");
        assert_eq!(format_usd_price(Some(0.0)), "N/A");
        assert_eq!(format_usd_price(None), "N/A");
    }

    #[test]
    fn test_volume_formatting() {
        assert_eq!(format_usd_volume(Some(1_234_567.0)), "$1,234,567");
        assert_eq!(format_usd_volume(Some(1234.5)), "$1,234.5");
        assert_eq!(format_usd_volume(Some(999.1239)), "$999.124");
        assert_eq!(format_usd_volume(Some(100_000.0)), "$100,000");
        assert_eq!(format_usd_volume(None), "N/A");
    }

    #[test]
    fn test_text_or() {
        assert_eq!(text_or(Some("  BONK "), UNKNOWN), "BONK");
        assert_eq!(text_or(Some(""), UNKNOWN), "Unknown");
        assert_eq!(text_or(None, NOT_AVAILABLE), "N/A");
    }
}
