//! Label-oriented number helpers shared by the built-in strategies.

const WAN: f64 = 10_000.0;
const YI: f64 = 100_000_000.0;

/// Abbreviates a value with 万 (10^4) / 亿 (10^8) units.
///
/// Abbreviated values keep one decimal, and a trailing `.0` is dropped.
/// Zero and non-finite input render as `"0"`.
#[must_use]
pub fn omit_num(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_owned();
    }

    let (text, unit) = if value >= YI {
        (format!("{:.1}", value / YI), "亿")
    } else if value >= WAN {
        (format!("{:.1}", value / WAN), "万")
    } else {
        (format_plain(value), "")
    };

    let text = match text.split_once('.') {
        Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole.to_owned(),
        _ => text,
    };
    format!("{text}{unit}")
}

/// Rounds a value up to a "nice" axis bound.
///
/// Values with two or more integer digits keep their two leading digits,
/// rounded up to the next multiple of ten, then rescaled (`1234 -> 2000`,
/// `87 -> 90`). Single-digit values map to `0.5` or `1` depending on
/// whether the integer digit plus the first decimal digit exceeds 4; an
/// integer value of `0` is returned unchanged.
#[must_use]
pub fn approximate_num(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return 0.0;
    }

    let text = format_plain(value);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    if whole.len() > 1 {
        let leading: f64 = whole[..2].parse().unwrap_or(0.0);
        let exponent = i32::try_from(whole.len() - 1).unwrap_or(i32::MAX);
        (leading / 10.0).ceil() * 10f64.powi(exponent)
    } else if whole != "0" {
        let integer = f64::from(whole.as_bytes()[0].wrapping_sub(b'0'));
        let first_decimal = fraction
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map_or(0.0, f64::from);
        if integer + first_decimal > 4.0 { 1.0 } else { 0.5 }
    } else {
        value
    }
}

fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
