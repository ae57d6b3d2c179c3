//! The payload view shared by every message variant.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use facade_core::{
    json_type_name, proxy, Clock, Coercion, Datum, FacadeError, Field, Node, Producer,
    Resolvable, SystemClock,
};
use facade_integrations::source::{context_root, context_root_key};
use facade_integrations::{EnablementDecision, IntegrationName, Resolver};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing::debug;

use crate::kind::MessageKind;

const TIMESTAMP: Field = Field::new("timestamp").with_coercion(Coercion::Temporal);
const USER_ID: Field = Field::new("userId");
const ANONYMOUS_ID: Field = Field::new("anonymousId");
const SESSION_ID: Field = Field::new("sessionId");
const MESSAGE_ID: Field = Field::new("messageId");
const CHANNEL: Field = Field::new("channel");

/// A read-only view over one raw message tree.
///
/// The tree is borrowed, never copied or mutated. Every accessor is a pure
/// function of the tree, except [`Payload::timestamp`], which falls back to
/// the configured [`Clock`] when the message carries no timestamp.
#[derive(Clone)]
pub struct Payload<'a> {
    raw: &'a Value,
    kind: Option<MessageKind>,
    producers: BTreeMap<String, Producer>,
    clock: Arc<dyn Clock>,
    resolver: Arc<Resolver>,
}

impl<'a> Payload<'a> {
    /// Wrap a raw tree. The root must be a JSON object.
    pub fn new(raw: &'a Value) -> Result<Self, FacadeError> {
        if !raw.is_object() {
            return Err(FacadeError::NonObjectRoot {
                found: json_type_name(raw),
            });
        }
        Ok(Payload {
            raw,
            kind: None,
            producers: BTreeMap::new(),
            clock: Arc::new(SystemClock),
            resolver: Arc::new(Resolver::default()),
        })
    }

    /// Use `clock` for the timestamp default.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Use `resolver` for integration enablement and settings.
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Register a computed top-level member. Path reads starting at `name`
    /// invoke `produce` and continue into its result; the member shadows a
    /// raw key of the same name.
    pub fn with_producer<F>(mut self, name: impl Into<String>, produce: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.producers.insert(name.into(), Arc::new(produce));
        self
    }

    pub(crate) fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The wrapped tree.
    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// The message variant this payload was wrapped as, if any.
    pub fn kind(&self) -> Option<MessageKind> {
        self.kind
    }

    // ── Generic reads ───────────────────────────────────────────────

    /// Read a dotted path, coercing temporal fields by name.
    pub fn proxy(&self, path: &str) -> Option<Datum> {
        proxy(self, path)
    }

    pub(crate) fn str_at(&self, field: Field) -> Option<String> {
        field.read(self).as_ref().and_then(scalar_string)
    }

    pub(crate) fn object_at(&self, path: &str) -> Map<String, Value> {
        facade_core::resolve(self, path)
            .and_then(|value| value.as_object().cloned())
            .unwrap_or_default()
    }

    /// `key` under the context root: `context`, or legacy `options`.
    pub(crate) fn context_path(&self, key: &str) -> String {
        let root = context_root_key(self.raw).unwrap_or("context");
        format!("{}.{}", root, key)
    }

    pub(crate) fn context_str(&self, key: &str) -> Option<String> {
        self.proxy(&self.context_path(key))
            .as_ref()
            .and_then(scalar_string)
    }

    pub(crate) fn context_object(&self, key: &str) -> Map<String, Value> {
        self.object_at(&self.context_path(key))
    }

    // ── Context and integrations ────────────────────────────────────

    /// The `context` object, or legacy `options` when `context` is
    /// absent, or an empty object.
    pub fn context(&self) -> Map<String, Value> {
        context_root(self.raw)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// Legacy name for [`Payload::context`].
    pub fn options(&self) -> Map<String, Value> {
        self.context()
    }

    /// Settings for `integration` when it is enabled, `None` otherwise.
    pub fn context_for(
        &self,
        integration: impl Into<IntegrationName>,
    ) -> Option<Map<String, Value>> {
        self.resolver.settings_if_enabled(self.raw, &integration.into())
    }

    /// Settings for `integration` regardless of enablement; never absent.
    pub fn options_for(&self, integration: impl Into<IntegrationName>) -> Map<String, Value> {
        self.resolver.options_for(self.raw, &integration.into())
    }

    pub fn enabled(&self, integration: impl Into<IntegrationName>) -> bool {
        self.resolver.enabled(self.raw, &integration.into())
    }

    /// Enablement together with the rule that decided it.
    pub fn decide(&self, integration: impl Into<IntegrationName>) -> EnablementDecision {
        self.resolver.decide(self.raw, &integration.into())
    }

    /// `context.active`, defaulting to `true`.
    pub fn active(&self) -> bool {
        self.proxy(&self.context_path("active"))
            .and_then(|active| active.as_bool())
            .unwrap_or(true)
    }

    // ── Identity ────────────────────────────────────────────────────

    pub fn user_id(&self) -> Option<String> {
        self.str_at(USER_ID)
    }

    /// `anonymousId`, falling back to the legacy `sessionId`.
    pub fn anonymous_id(&self) -> Option<String> {
        self.str_at(ANONYMOUS_ID).or_else(|| self.session_id())
    }

    pub fn session_id(&self) -> Option<String> {
        self.str_at(SESSION_ID)
    }

    pub fn message_id(&self) -> Option<String> {
        self.str_at(MESSAGE_ID)
    }

    pub fn group_id(&self) -> Option<String> {
        self.context_str("groupId")
    }

    // ── Delivery metadata ───────────────────────────────────────────

    pub fn channel(&self) -> Option<String> {
        self.str_at(CHANNEL)
    }

    pub fn timezone(&self) -> Option<String> {
        self.context_str("timezone")
    }

    pub fn user_agent(&self) -> Option<String> {
        self.context_str("userAgent")
    }

    pub fn ip(&self) -> Option<String> {
        self.context_str("ip")
    }

    /// The message timestamp, or the clock's current time when the message
    /// carries none. Read at call time, not at construction.
    pub fn timestamp(&self) -> OffsetDateTime {
        match TIMESTAMP.read(self) {
            Some(Datum::Date(date)) => date,
            Some(other) => {
                debug!(found = other.type_name(), "timestamp is not a date, using clock");
                self.clock.now()
            }
            None => self.clock.now(),
        }
    }

    /// A copy of the raw tree, with `type` set when the variant is known.
    pub fn json(&self) -> Value {
        let mut json = self.raw.clone();
        if let (Some(kind), Some(map)) = (self.kind, json.as_object_mut()) {
            map.insert("type".to_string(), Value::String(kind.as_str().to_string()));
        }
        json
    }
}

impl Resolvable for Payload<'_> {
    fn entry(&self, key: &str) -> Option<Node<'_>> {
        match self.producers.get(key) {
            Some(produce) => Some(Node::Producer(produce)),
            None => self.raw.entry(key),
        }
    }

    fn root_value(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self.raw)
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("kind", &self.kind)
            .field("raw", self.raw)
            .field("producers", &self.producers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Strings as-is, numbers in their JSON spelling, anything else absent.
pub(crate) fn scalar_string(datum: &Datum) -> Option<String> {
    match datum {
        Datum::Text(s) => Some(s.clone()),
        Datum::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
