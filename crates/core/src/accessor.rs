//! Reusable accessors bound to a path.
//!
//! An accessor holds a path and a coercion mode and nothing else; the root
//! it reads from is supplied at call time. Accessors are `const`-constructible
//! so payload types can declare them once:
//!
//! ```
//! use facade_core::{Field, Multi};
//! use serde_json::json;
//!
//! const USER_AGENT: Field = Field::new("context.userAgent");
//! const WEBSITES: Multi = Multi::new("traits.website");
//!
//! let raw = json!({ "context": { "userAgent": "safari" } });
//! assert_eq!(USER_AGENT.read(&raw).unwrap().as_str(), Some("safari"));
//! assert!(WEBSITES.read(&raw).is_empty());
//! ```

use serde_json::Value;

use crate::datum::Datum;
use crate::path::{resolve, Resolvable};
use crate::temporal::coerce_date;

/// Post-processing applied to a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coercion {
    /// Coerce dates under a `dates` key or at a key named `timestamp`.
    #[default]
    ByFieldName,
    /// Coerce every string or number that parses as a date.
    Temporal,
    /// Return the value untouched.
    Raw,
}

/// Whether a key names a temporal field by convention.
pub fn is_temporal_key(key: &str) -> bool {
    key == "dates" || key == "timestamp"
}

fn is_temporal_path(path: &str) -> bool {
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if segment == "dates" || (segment == "timestamp" && segments.peek().is_none()) {
            return true;
        }
    }
    false
}

fn convert(value: &Value, coercion: Coercion, temporal: bool) -> Datum {
    match value {
        Value::String(_) | Value::Number(_) if temporal => {
            coerce_date(value).map_or_else(|| Datum::from(value), Datum::Date)
        }
        Value::Array(items) => Datum::List(
            items
                .iter()
                .map(|item| convert(item, coercion, temporal))
                .collect(),
        ),
        Value::Object(map) => Datum::Map(
            map.iter()
                .map(|(key, child)| {
                    let child_temporal = temporal
                        || (coercion == Coercion::ByFieldName && is_temporal_key(key));
                    (key.clone(), convert(child, coercion, child_temporal))
                })
                .collect(),
        ),
        other => Datum::from(other),
    }
}

/// Resolve `path` and apply `coercion` to the result.
pub fn read_path<R>(root: &R, path: &str, coercion: Coercion) -> Option<Datum>
where
    R: Resolvable + ?Sized,
{
    let value = resolve(root, path)?;
    let temporal = match coercion {
        Coercion::ByFieldName => is_temporal_path(path),
        Coercion::Temporal => true,
        Coercion::Raw => false,
    };
    Some(convert(&value, coercion, temporal))
}

/// One-shot read, equivalent to `Field::new(path).read(root)`.
pub fn proxy<R>(root: &R, path: &str) -> Option<Datum>
where
    R: Resolvable + ?Sized,
{
    read_path(root, path, Coercion::ByFieldName)
}

// ──────────────────────────────────────────────
// Field
// ──────────────────────────────────────────────

/// A single-path accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    path: &'static str,
    coercion: Coercion,
}

impl Field {
    pub const fn new(path: &'static str) -> Self {
        Field {
            path,
            coercion: Coercion::ByFieldName,
        }
    }

    pub const fn with_coercion(self, coercion: Coercion) -> Self {
        Field {
            path: self.path,
            coercion,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn read<R>(&self, root: &R) -> Option<Datum>
    where
        R: Resolvable + ?Sized,
    {
        read_path(root, self.path, self.coercion)
    }

    /// Read as a string; non-string values count as absent.
    pub fn read_str<R>(&self, root: &R) -> Option<String>
    where
        R: Resolvable + ?Sized,
    {
        match self.read(root)? {
            Datum::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Multi / One
// ──────────────────────────────────────────────

/// Reads a field stored either once at `<path>` or as a sequence at
/// `<path>s`, always yielding a sequence. The singular form wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multi {
    path: &'static str,
}

impl Multi {
    pub const fn new(singular: &'static str) -> Self {
        Multi { path: singular }
    }

    pub fn read<R>(&self, root: &R) -> Vec<Datum>
    where
        R: Resolvable + ?Sized,
    {
        if let Some(single) = read_singular(root, self.path) {
            return vec![single];
        }
        match read_path(root, &plural(self.path), Coercion::ByFieldName) {
            Some(Datum::List(items)) => items,
            Some(Datum::Null) | None => Vec::new(),
            Some(other) => vec![other],
        }
    }
}

/// Same precedence as [`Multi`], keeping only the first value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct One {
    path: &'static str,
}

impl One {
    pub const fn new(singular: &'static str) -> Self {
        One { path: singular }
    }

    pub fn read<R>(&self, root: &R) -> Option<Datum>
    where
        R: Resolvable + ?Sized,
    {
        if let Some(single) = read_singular(root, self.path) {
            return Some(single);
        }
        match read_path(root, &plural(self.path), Coercion::ByFieldName)? {
            Datum::List(items) => items.into_iter().next(),
            Datum::Null => None,
            other => Some(other),
        }
    }
}

fn read_singular<R>(root: &R, path: &str) -> Option<Datum>
where
    R: Resolvable + ?Sized,
{
    read_path(root, path, Coercion::ByFieldName).filter(|d| !d.is_null())
}

fn plural(singular: &str) -> String {
    format!("{}s", singular)
}
