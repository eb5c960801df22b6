//! Conversion between operand text and floating-point values.
//!
//! Operands live as text in the interaction state. Parsing takes the longest
//! numeric prefix of that text, and formatting produces the shortest text that
//! round-trips, with `Infinity`/`NaN` spelled out and exponent notation for very
//! large or very small magnitudes.

use thiserror::Error;

/// Reasons operand text fails to parse as a number.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NumberError {
    #[error("operand is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Parse operand text as a number.
///
/// Leading whitespace is skipped and anything after the longest valid numeric
/// prefix is ignored, so `"12."` is 12 and `"Infinity3"` is infinity. Text
/// without a numeric prefix, or text that would produce NaN, is an error.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::parse_operand;
///
/// assert_eq!(parse_operand("12.5").unwrap(), 12.5);
/// assert_eq!(parse_operand(".5").unwrap(), 0.5);
/// assert!(parse_operand(".").is_err());
/// assert!(parse_operand("").is_err());
/// ```
pub fn parse_operand(text: &str) -> Result<f64, NumberError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(NumberError::Empty);
    }

    let prefix = numeric_prefix(trimmed).ok_or_else(|| NumberError::NotANumber(text.to_string()))?;

    let value = match prefix.trim_start_matches(['+', '-']) {
        "Infinity" if prefix.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => prefix
            .parse::<f64>()
            .map_err(|_| NumberError::NotANumber(text.to_string()))?,
    };

    if value.is_nan() {
        return Err(NumberError::NotANumber(text.to_string()));
    }
    Ok(value)
}

/// Longest prefix of `text` that reads as a number, if any.
fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        return Some(&text[..end + "Infinity".len()]);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        // A dangling exponent marker is not part of the number.
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&text[..end])
}

/// Format a value the way it appears in the display and the trace log.
///
/// # Example
///
/// ```rust
/// use pocketcalc::core::format_number;
///
/// assert_eq!(format_number(17.0), "17");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}
