//! facade-core: typed reads over raw event trees.
//!
//! A raw tree is any `serde_json::Value`. This crate provides the read
//! primitives the rest of the workspace is built on:
//!
//! - [`resolve()`] -- walk a dotted path, yielding `None` on absence
//! - [`Field`], [`Multi`], [`One`] -- reusable accessors bound to a path
//! - [`proxy()`] -- one-shot equivalent of a [`Field`] read
//! - [`Datum`] -- the typed value accessors return, with coerced dates
//! - [`Clock`] -- the time source behind "now" defaults
//!
//! Absence is never an error. The only error, [`FacadeError`], reports
//! misuse such as wrapping a non-object root.

pub mod accessor;
pub mod clock;
pub mod datum;
pub mod error;
pub mod path;
pub mod temporal;

pub use accessor::{proxy, read_path, Coercion, Field, Multi, One};
pub use clock::{Clock, FixedClock, SystemClock};
pub use datum::{json_type_name, Datum};
pub use error::FacadeError;
pub use path::{resolve, resolve_or, Node, Producer, Resolvable};
pub use temporal::{coerce_date, parse_date_str};
