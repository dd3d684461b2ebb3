//! Value and row encoders: typed column values to SQL literal text.
//!
//! Every literal produced here is round-trip safe: parsing it back under
//! GoogleSQL rules yields the exact source value. That drives the more
//! unusual choices — every byte of a BYTES value is hex-escaped, FLOAT64
//! uses the shortest decimal that reparses to the same bits, and NUMERIC is
//! always rendered with its full 9 fraction digits.

use std::fmt::Write as _;

use bigdecimal::BigDecimal;
use chrono::SecondsFormat;

use crate::core::value::Value;
use crate::error::{DumpError, Result};

/// NUMERIC holds at most 29 integer digits.
const NUMERIC_INTEGER_DIGITS: u64 = 29;

/// NUMERIC holds exactly 9 fraction digits.
const NUMERIC_FRACTION_DIGITS: u64 = 9;

/// Encode a single typed value as a SQL literal token.
///
/// Total for all well-formed input; the only error case is a NUMERIC value
/// with more digits than the type can represent, which is reported rather
/// than truncated.
pub fn encode_value(value: &Value) -> Result<String> {
    match value {
        Value::Bool(None)
        | Value::Int64(None)
        | Value::Float64(None)
        | Value::String(None)
        | Value::Bytes(None)
        | Value::Timestamp(None)
        | Value::Date(None)
        | Value::Numeric(None)
        | Value::Json(None)
        | Value::Array(None) => Ok("NULL".to_string()),

        Value::Bool(Some(b)) => Ok(b.to_string()),
        Value::Int64(Some(i)) => Ok(i.to_string()),
        Value::Float64(Some(f)) => Ok(encode_float(*f)),
        Value::String(Some(s)) => Ok(encode_string_literal(s)),
        Value::Bytes(Some(b)) => Ok(encode_bytes(b)),
        Value::Timestamp(Some(ts)) => Ok(format!(
            "TIMESTAMP \"{}\"",
            ts.to_rfc3339_opts(SecondsFormat::Secs, true)
        )),
        Value::Date(Some(d)) => Ok(format!("DATE \"{}\"", d.format("%Y-%m-%d"))),
        Value::Numeric(Some(n)) => encode_numeric(n),
        Value::Json(Some(j)) => {
            let text = serde_json::to_string(j)?;
            Ok(format!("JSON {}", encode_string_literal(&text)))
        }
        Value::Array(Some(elements)) => {
            let mut encoded = Vec::with_capacity(elements.len());
            for element in elements {
                encoded.push(encode_value(element)?);
            }
            Ok(format!("[{}]", encoded.join(", ")))
        }
    }
}

/// Encode one row of values, one literal token per column, in column order.
///
/// The first failing value aborts the row; no partial literal is emitted.
pub fn encode_row(row: &[Value]) -> Result<Vec<String>> {
    row.iter().map(encode_value).collect()
}

/// Double-quoted string literal with `\`, `"`, and newline escaped.
///
/// Other control characters pass through unchanged; GoogleSQL accepts them
/// inside a quoted literal.
fn encode_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `b"..."` literal with every byte rendered as `\xHH`.
///
/// Escaping all bytes, not only non-printable ones, keeps the literal
/// unambiguous regardless of the source encoding.
fn encode_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4 + 3);
    out.push_str("b\"");
    for b in bytes {
        // write! to a String cannot fail
        let _ = write!(out, "\\x{:02x}", b);
    }
    out.push('"');
    out
}

/// FLOAT64 literal: shortest round-trip decimal, with the non-finite cases
/// special-cased as CAST expressions since they have no literal form.
fn encode_float(f: f64) -> String {
    if f.is_nan() {
        return "CAST('nan' AS FLOAT64)".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 {
            "CAST('inf' AS FLOAT64)".to_string()
        } else {
            "CAST('-inf' AS FLOAT64)".to_string()
        };
    }
    format_shortest(f)
}

/// Shortest decimal representation of a finite double that parses back to
/// the same bits.
///
/// Exponential notation is used when the decimal exponent is below -4 or at
/// least 21, with a sign and two-digit minimum width on the exponent
/// (`1.7976931348623157e+308`, `5e-324`); everything in between renders in
/// plain positional notation.
fn format_shortest(f: f64) -> String {
    // {:e} yields the shortest mantissa that round-trips, e.g. "1.23e0".
    let sci = format!("{:e}", f);
    let (mantissa, exp_str) = match sci.split_once('e') {
        Some(parts) => parts,
        // Unreachable for finite doubles; fall back to the raw form.
        None => return sci,
    };
    let exp: i32 = match exp_str.parse() {
        Ok(e) => e,
        Err(_) => return sci,
    };

    if exp < -4 || exp >= 21 {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs());
    }

    let (neg, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let point = exp + 1; // position of the decimal point within `digits`

    let mut out = String::new();
    if neg {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        for _ in 0..(-point) {
            out.push('0');
        }
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        for _ in 0..(point as usize - digits.len()) {
            out.push('0');
        }
    } else {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    }
    out
}

/// NUMERIC literal: exact fixed-point text with all 9 fraction digits.
///
/// Values needing more than 9 fraction digits or 29 integer digits are a
/// hard error; truncating would silently corrupt the dump.
fn encode_numeric(n: &BigDecimal) -> Result<String> {
    let overflow = || DumpError::NumericOverflow {
        value: n.to_string(),
        max_integer_digits: NUMERIC_INTEGER_DIGITS,
        max_fraction_digits: NUMERIC_FRACTION_DIGITS,
    };

    let scaled = n.with_scale(NUMERIC_FRACTION_DIGITS as i64);
    // with_scale drops digits past the ninth fraction place; an inexact
    // result means the value was not representable.
    if &scaled != n {
        return Err(overflow());
    }
    if scaled.digits() > NUMERIC_INTEGER_DIGITS + NUMERIC_FRACTION_DIGITS {
        return Err(overflow());
    }

    Ok(format!("NUMERIC \"{}\"", scaled))
}
