//! Loose value coercions used while formatting a record.
//!
//! Records come from dynamically typed logging facilities, so `level` may be
//! a number, a numeric string, or something else entirely, and "is this field
//! set" follows truthiness rather than mere presence.

use serde_json::Value;

/// Numeric form of a `level` value, or `None` when it has no numeric reading.
///
/// Strings are trimmed; the empty string reads as 0. Decimal, exponent and
/// `0x`/`0o`/`0b` forms are accepted. Booleans read as 1/0, `null` as 0. An
/// empty array reads as 0 and a one-element array as its element.
pub fn numeric_level(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => numeric_str(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            // A nested boolean renders as "true"/"false" first, which has no
            // numeric reading.
            [Value::Bool(_)] | [Value::Object(_)] => None,
            [single] => numeric_level(single),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

fn numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    if let Some(n) = radix_literal(s) {
        return Some(n);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // `str::parse::<f64>` also takes "inf" and "NaN"; only plain decimal
    // notation counts here.
    let decimal = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal {
        return None;
    }
    s.parse::<f64>().ok()
}

fn radix_literal(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Truthiness: present and not `null`, `false`, `0` or `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
