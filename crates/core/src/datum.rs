//! Typed read values.

use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

// ──────────────────────────────────────────────
// Datum
// ──────────────────────────────────────────────

/// A value read from a raw tree.
///
/// Mirrors the JSON data model with one addition: [`Datum::Date`], which
/// only appears when an accessor coerced a temporal field.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Date(OffsetDateTime),
    List(Vec<Datum>),
    Map(BTreeMap<String, Datum>),
}

impl Datum {
    /// Returns a human-readable type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Datum::Null => "null",
            Datum::Bool(_) => "boolean",
            Datum::Number(_) => "number",
            Datum::Text(_) => "string",
            Datum::Date(_) => "date",
            Datum::List(_) => "array",
            Datum::Map(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Datum::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<OffsetDateTime> {
        match self {
            Datum::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Datum]> {
        match self {
            Datum::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Datum>> {
        match self {
            Datum::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key when this is a map.
    pub fn get(&self, key: &str) -> Option<&Datum> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Convert back to JSON. Dates render as RFC 3339 strings, or as epoch
    /// seconds when the year cannot be expressed in RFC 3339.
    pub fn to_json(&self) -> Value {
        match self {
            Datum::Null => Value::Null,
            Datum::Bool(b) => Value::Bool(*b),
            Datum::Number(n) => Value::Number(n.clone()),
            Datum::Text(s) => Value::String(s.clone()),
            Datum::Date(d) => d
                .format(&Rfc3339)
                .map(Value::String)
                .unwrap_or_else(|_| Value::from(d.unix_timestamp())),
            Datum::List(items) => Value::Array(items.iter().map(Datum::to_json).collect()),
            Datum::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for Datum {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Datum::Null,
            Value::Bool(b) => Datum::Bool(*b),
            Value::Number(n) => Datum::Number(n.clone()),
            Value::String(s) => Datum::Text(s.clone()),
            Value::Array(items) => Datum::List(items.iter().map(Datum::from).collect()),
            Value::Object(map) => Datum::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Datum::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        Datum::from(&value)
    }
}

impl From<OffsetDateTime> for Datum {
    fn from(date: OffsetDateTime) -> Self {
        Datum::Date(date)
    }
}

impl Serialize for Datum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Datum::Null => serializer.serialize_unit(),
            Datum::Bool(b) => serializer.serialize_bool(*b),
            Datum::Number(n) => n.serialize(serializer),
            Datum::Text(s) => serializer.serialize_str(s),
            Datum::Date(d) => {
                let formatted = d.format(&Rfc3339).map_err(S::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            Datum::List(items) => items.serialize(serializer),
            Datum::Map(map) => map.serialize(serializer),
        }
    }
}

/// JSON type name of a raw value, for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
