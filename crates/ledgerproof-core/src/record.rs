//! Structured record model.
//!
//! A [`Record`] is the tagged form of any JSON-representable value handed
//! to the commitment engine. Objects are held in a `BTreeMap`, so keys are
//! kept in byte-wise order and a repeated key overwrites the earlier one.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Numeric value of a record field.
///
/// Integers keep their exact value; everything else is an IEEE-754 double.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    PosInt(u64),
    NegInt(i64),
    Float(f64),
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::PosInt(n)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        if n >= 0 {
            Number::PosInt(n as u64)
        } else {
            Number::NegInt(n)
        }
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

/// A structured record value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Record {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Record>),
    Object(BTreeMap<String, Record>),
}

impl Record {
    /// Build an object from key/value pairs. Later duplicates win.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Record)>,
    {
        Record::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array preserving element order.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        Record::Array(items.into_iter().collect())
    }

    /// Look up a top-level field of an object record.
    pub fn get(&self, key: &str) -> Option<&Record> {
        match self {
            Record::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Short name of the variant, used in log fields and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Record::Null => "null",
            Record::Bool(_) => "bool",
            Record::Number(_) => "number",
            Record::String(_) => "string",
            Record::Array(_) => "array",
            Record::Object(_) => "object",
        }
    }
}

impl From<bool> for Record {
    fn from(b: bool) -> Self {
        Record::Bool(b)
    }
}

impl From<u64> for Record {
    fn from(n: u64) -> Self {
        Record::Number(n.into())
    }
}

impl From<i64> for Record {
    fn from(n: i64) -> Self {
        Record::Number(n.into())
    }
}

impl From<f64> for Record {
    fn from(n: f64) -> Self {
        Record::Number(n.into())
    }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self {
        Record::String(s.to_string())
    }
}

impl From<String> for Record {
    fn from(s: String) -> Self {
        Record::String(s)
    }
}

impl From<serde_json::Number> for Number {
    fn from(n: serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Number::PosInt(u)
        } else if let Some(i) = n.as_i64() {
            Number::NegInt(i)
        } else {
            // serde_json only yields finite floats here
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<serde_json::Value> for Record {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Record::Null,
            serde_json::Value::Bool(b) => Record::Bool(b),
            serde_json::Value::Number(n) => Record::Number(n.into()),
            serde_json::Value::String(s) => Record::String(s),
            serde_json::Value::Array(items) => {
                Record::Array(items.into_iter().map(Record::from).collect())
            }
            serde_json::Value::Object(map) => {
                Record::Object(map.into_iter().map(|(k, v)| (k, Record::from(v))).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Record::from)
    }
}
