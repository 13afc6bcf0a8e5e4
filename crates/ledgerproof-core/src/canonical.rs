//! Deterministic record canonicalization.
//!
//! Maps a [`Record`] to a unique byte string so that two records with the
//! same logical value always hash identically.
//!
//! ## Canonical Form
//!
//! - Compact JSON text, no whitespace
//! - Object keys sorted by their UTF-8 bytes
//! - Arrays keep their order
//! - Strings escape only `"`, `\` and code points below U+0020
//!   (`\b \f \n \r \t` short forms, otherwise `\u00xx` lowercase)
//! - Numbers print one form per value: integral values without a fraction
//!   (`1.0`, `1e0` and `1` all print `1`), other values as the shortest
//!   round-tripping decimal, never in exponent notation; `-0` prints `0`
//!
//! Non-finite numbers have no canonical form and fail with
//! `LedgerProofError::UnsupportedValueKind`.

use crate::errors::{LedgerProofError, Result};
use crate::record::{Number, Record};
use std::collections::BTreeMap;

/// Canonicalize a record into its deterministic byte encoding.
///
/// ## Errors
///
/// Returns `LedgerProofError::UnsupportedValueKind` carrying the JSON path
/// of the first value without a canonical form.
///
/// ## Example
///
/// ```
/// use ledgerproof_core::canonical::canonicalize;
/// use ledgerproof_core::Record;
///
/// let record: Record = serde_json::from_str(r#"{"b": 2, "a": 1.0}"#).unwrap();
/// assert_eq!(canonicalize(&record).unwrap(), br#"{"a":1,"b":2}"#.to_vec());
/// ```
pub fn canonicalize(record: &Record) -> Result<Vec<u8>> {
    canonical_string(record).map(String::into_bytes)
}

/// Canonicalize a record into its canonical JSON text.
///
/// ## Errors
///
/// Same as [`canonicalize`].
pub fn canonical_string(record: &Record) -> Result<String> {
    let mut out = String::new();
    let mut path = String::from("$");
    write_value(&mut out, record, &mut path)?;
    Ok(out)
}

fn write_value(out: &mut String, record: &Record, path: &mut String) -> Result<()> {
    match record {
        Record::Null => out.push_str("null"),
        Record::Bool(true) => out.push_str("true"),
        Record::Bool(false) => out.push_str("false"),
        Record::Number(n) => write_number(out, n, path)?,
        Record::String(s) => write_string(out, s),
        Record::Array(items) => write_array(out, items, path)?,
        Record::Object(map) => write_object(out, map, path)?,
    }
    Ok(())
}

fn write_array(out: &mut String, items: &[Record], path: &mut String) -> Result<()> {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let mark = path.len();
        path.push_str(&format!("[{}]", i));
        write_value(out, item, path)?;
        path.truncate(mark);
    }
    out.push(']');
    Ok(())
}

fn write_object(out: &mut String, map: &BTreeMap<String, Record>, path: &mut String) -> Result<()> {
    out.push('{');
    // BTreeMap<String, _> iterates in byte-wise key order
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        let mark = path.len();
        path.push('.');
        path.push_str(key);
        write_value(out, value, path)?;
        path.truncate(mark);
    }
    out.push('}');
    Ok(())
}

fn write_number(out: &mut String, n: &Number, path: &str) -> Result<()> {
    match *n {
        Number::PosInt(u) => out.push_str(&u.to_string()),
        Number::NegInt(i) => out.push_str(&i.to_string()),
        Number::Float(f) => {
            if !f.is_finite() {
                return Err(LedgerProofError::UnsupportedValueKind {
                    path: path.to_string(),
                    reason: format!("non-finite number {}", f),
                });
            }
            if f == 0.0 {
                out.push('0');
            } else {
                // f64 Display is shortest round-trip and never uses an exponent
                out.push_str(&f.to_string());
            }
        }
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(json: &str) -> String {
        let record: Record = serde_json::from_str(json).unwrap();
        canonical_string(&record).unwrap()
    }

    #[test]
    fn test_keys_sorted_and_whitespace_dropped() {
        assert_eq!(canon(r#"{ "b" : 2, "a" : 1 }"#), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_nested_objects_sorted_arrays_kept() {
        assert_eq!(
            canon(r#"{"z":[3,1,2],"m":{"y":true,"x":null}}"#),
            r#"{"m":{"x":null,"y":true},"z":[3,1,2]}"#
        );
    }

    #[test]
    fn test_keys_sort_bytewise_not_by_locale() {
        assert_eq!(canon(r#"{"a":1,"B":2,"é":3,"_":4}"#), r#"{"B":2,"_":4,"a":1,"é":3}"#);
    }

    #[test]
    fn test_number_spellings_collapse() {
        assert_eq!(canon("1"), "1");
        assert_eq!(canon("1.0"), "1");
        assert_eq!(canon("1e0"), "1");
        assert_eq!(canon("100"), canon("1e2"));
        assert_eq!(canon("-0.0"), "0");
        assert_eq!(canon("-0"), "0");
    }

    #[test]
    fn test_fractions_use_plain_decimal() {
        assert_eq!(canon("0.5"), "0.5");
        assert_eq!(canon("1.50"), "1.5");
        assert_eq!(canon("1e-7"), "0.0000001");
        assert_eq!(canon("-2.25"), "-2.25");
        assert_eq!(canon("1e21"), "1000000000000000000000");
    }

    #[test]
    fn test_large_integers_exact() {
        assert_eq!(canon("18446744073709551615"), "18446744073709551615");
        assert_eq!(canon("-9223372036854775808"), "-9223372036854775808");
    }

    #[test]
    fn test_string_escaping_is_fixed() {
        let record = Record::from("quote\" back\\ nl\n tab\t bell\u{07} del\u{7f} ünï");
        assert_eq!(
            canonical_string(&record).unwrap(),
            "\"quote\\\" back\\\\ nl\\n tab\\t bell\\u0007 del\u{7f} ünï\""
        );
    }

    #[test]
    fn test_escaped_input_spelling_is_irrelevant() {
        assert_eq!(canon(r#""A\/""#), canon(r#""A/""#));
    }

    #[test]
    fn test_non_finite_number_reports_path() {
        let record = Record::object([(
            "readings",
            Record::array([Record::from(1.0), Record::from(f64::NAN)]),
        )]);
        let err = canonicalize(&record).unwrap_err();
        match err {
            LedgerProofError::UnsupportedValueKind { path, .. } => {
                assert_eq!(path, "$.readings[1]");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_infinity_rejected() {
        assert!(canonicalize(&Record::from(f64::INFINITY)).is_err());
        assert!(canonicalize(&Record::from(f64::NEG_INFINITY)).is_err());
    }
}
