//! Numeric-or-null coercion shared by the cleaning and validation paths.

use serde_json::Value;

/// Best-effort conversion of an arbitrary JSON value to a finite number.
///
/// Numbers pass through, strings are read up to the end of their leading
/// numeric prefix (`"42.3abc"` becomes `42.3`), and everything else
/// (null, booleans, arrays, objects) is `None`. Never yields NaN or an
/// infinity.
pub fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_leading_float(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce an optional value, treating a missing field the same as null.
pub fn coerce_opt(value: Option<&Value>) -> Option<f64> {
    value.and_then(coerce)
}

/// Parse the longest decimal literal at the start of `input`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fractional part, and an exponent only when it carries digits.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - end - 1;
        if digits > 0 {
            end = frac_end;
        }
    }

    // "Infinity" and friends land here and stay null
    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
