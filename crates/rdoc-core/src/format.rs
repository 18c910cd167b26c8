//! Human-readable formatting of report numbers.
//!
//! All helpers render absent values as [`NOT_AVAILABLE`]. Rounding to one
//! decimal is half away from zero, so `5.25` becomes `5.3`.
//!
//! The sign of a change is taken after rounding: anything that rounds to zero,
//! including small negatives such as `-0.04`, prints as `+0.0%` rather than
//! `-0.0%`.

/// Placeholder shown for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a percentage delta as `+5.3%` / `-2.0%`.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        None => NOT_AVAILABLE.to_string(),
        Some(value) => {
            let rounded = round_one_decimal(value);
            let sign = if rounded >= 0.0 { "+" } else { "" };
            format!("{}{:.1}%", sign, rounded)
        }
    }
}

/// Format a count with thousands separators (`1234567` -> `1,234,567`).
///
/// Integral values print without a fractional part; other values keep their
/// shortest decimal representation.
pub fn format_number(value: Option<f64>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };
    if !value.is_finite() {
        return value.to_string();
    }

    let raw = value.abs().to_string();
    let (integer, fraction) = match raw.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + raw.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Format a rate as one decimal with a `%` suffix (`3.456` -> `3.5%`).
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_decimal(value))
}

/// Format a value with exactly one decimal (`7.25` -> `7.3`).
pub fn format_decimal(value: f64) -> String {
    format!("{:.1}", round_one_decimal(value))
}

fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Collapse -0.0 so it never prints as "-0.0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(5.25)), "+5.3%");
        assert_eq!(format_change(Some(-2.04)), "-2.0%");
        assert_eq!(format_change(Some(0.0)), "+0.0%");
        assert_eq!(format_change(Some(150.0)), "+150.0%");
        assert_eq!(format_change(None), "N/A");
    }

    #[test]
    fn test_format_change_tiny_negative_is_zero() {
        assert_eq!(format_change(Some(-0.04)), "+0.0%");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(Some(1234567.0)), "1,234,567");
        assert_eq!(format_number(Some(999.0)), "999");
        assert_eq!(format_number(Some(1000.0)), "1,000");
        assert_eq!(format_number(Some(0.0)), "0");
        assert_eq!(format_number(None), "N/A");
    }

    #[test]
    fn test_format_number_fractional_and_negative() {
        assert_eq!(format_number(Some(1234.5)), "1,234.5");
        assert_eq!(format_number(Some(-98765.25)), "-98,765.25");
    }

    #[test]
    fn test_format_percent_and_decimal() {
        assert_eq!(format_percent(3.456), "3.5%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_decimal(7.25), "7.3");
        assert_eq!(format_decimal(12.0), "12.0");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
