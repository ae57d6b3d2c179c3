//! Dotted-path traversal over raw trees.
//!
//! A path like `band.meeting.present` is walked one key at a time. Each
//! step goes through [`Node::child`], the single place that knows how the
//! different node kinds are traversed:
//!
//! - mappings descend into the named key
//! - sequences descend into a decimal index
//! - producers are invoked with no arguments and traversal continues on
//!   their result
//!
//! Anything else ends the walk, and the path resolves to `None`.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

/// A zero-argument callable whose result is traversed lazily.
pub type Producer = Arc<dyn Fn() -> Value + Send + Sync>;

/// One step of a traversal.
pub enum Node<'a> {
    /// A value borrowed from the wrapped tree.
    Value(&'a Value),
    /// A value produced during traversal.
    Owned(Value),
    /// A producer that has not been invoked yet.
    Producer(&'a Producer),
}

impl<'a> Node<'a> {
    /// Descend one key. Producers are invoked here and nowhere else.
    pub fn child(self, key: &str) -> Option<Node<'a>> {
        match self {
            Node::Value(value) => borrowed_child(value, key).map(Node::Value),
            Node::Owned(value) => owned_child(value, key).map(Node::Owned),
            Node::Producer(produce) => owned_child(produce(), key).map(Node::Owned),
        }
    }

    /// Finish the traversal, invoking a trailing producer.
    pub fn settle(self) -> Cow<'a, Value> {
        match self {
            Node::Value(value) => Cow::Borrowed(value),
            Node::Owned(value) => Cow::Owned(value),
            Node::Producer(produce) => Cow::Owned(produce()),
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Node::Owned(value) => f.debug_tuple("Owned").field(value).finish(),
            Node::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

fn borrowed_child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn owned_child(value: Value, key: &str) -> Option<Value> {
    match value {
        Value::Object(mut map) => map.remove(key),
        Value::Array(mut items) => {
            let index = key.parse::<usize>().ok()?;
            if index < items.len() {
                Some(items.swap_remove(index))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// A root a path can be resolved against.
///
/// Plain trees implement this directly. Wrappers that expose extra
/// top-level members (such as producers registered on a payload)
/// implement [`Resolvable::entry`] to consult those first.
pub trait Resolvable {
    /// Look up a top-level key.
    fn entry(&self, key: &str) -> Option<Node<'_>>;

    /// The root itself, returned for the empty path.
    fn root_value(&self) -> Cow<'_, Value>;
}

impl Resolvable for Value {
    fn entry(&self, key: &str) -> Option<Node<'_>> {
        borrowed_child(self, key).map(Node::Value)
    }

    fn root_value(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

/// Resolve `path` against `root`.
///
/// Returns the terminal value whenever every step resolves, including a
/// terminal `null`. Returns `None` as soon as a key is missing or a node
/// cannot be descended into.
pub fn resolve<'a, R>(root: &'a R, path: &str) -> Option<Cow<'a, Value>>
where
    R: Resolvable + ?Sized,
{
    if path.is_empty() {
        return Some(root.root_value());
    }

    let mut keys = path.split('.');
    let first = keys.next().unwrap_or_default();
    let mut node = match root.entry(first) {
        Some(node) => node,
        None => {
            trace!(path, key = first, "path unresolved");
            return None;
        }
    };
    for key in keys {
        node = match node.child(key) {
            Some(next) => next,
            None => {
                trace!(path, key, "path unresolved");
                return None;
            }
        };
    }
    Some(node.settle())
}

/// Resolve `path`, substituting `fallback` when it does not resolve.
pub fn resolve_or<'a, R>(root: &'a R, path: &str, fallback: Value) -> Cow<'a, Value>
where
    R: Resolvable + ?Sized,
{
    resolve(root, path).unwrap_or(Cow::Owned(fallback))
}
