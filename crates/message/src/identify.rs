use std::ops::Deref;

use facade_core::{read_path, Coercion, Datum, FacadeError};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::kind::MessageKind;
use crate::payload::Payload;

/// An `identify` message: who the user is.
///
/// Traits come from the top-level `traits` object, falling back to
/// `context.traits`. Several traits are derived when absent, and trait
/// aliasing sees the derived values.
#[derive(Debug, Clone)]
pub struct Identify<'a> {
    payload: Payload<'a>,
}

impl<'a> Identify<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, FacadeError> {
        Payload::new(raw).map(Identify::from)
    }

    /// `traits.email`, else `userId` when it looks like an address.
    pub fn email(&self) -> Option<String> {
        email(&self.payload)
    }

    /// `traits.name`, else first and last name joined.
    pub fn name(&self) -> Option<String> {
        name(&self.payload)
    }

    pub fn first_name(&self) -> Option<String> {
        first_name(&self.payload)
    }

    pub fn last_name(&self) -> Option<String> {
        last_name(&self.payload)
    }

    pub fn username(&self) -> Option<String> {
        trait_str(&self.traits(), "username")
    }

    /// `traits.created`, else `traits.createdAt`, as a date.
    pub fn created(&self) -> Option<OffsetDateTime> {
        created(&self.payload)
    }
}

fn trait_str(traits: &Map<String, Value>, key: &str) -> Option<String> {
    traits
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn email(payload: &Payload<'_>) -> Option<String> {
    trait_str(&payload.traits(), "email").or_else(|| {
        payload
            .user_id()
            .filter(|id| id.contains('@'))
    })
}

fn name(payload: &Payload<'_>) -> Option<String> {
    let traits = payload.traits();
    trait_str(&traits, "name").or_else(|| {
        let parts: Vec<String> = ["firstName", "lastName"]
            .iter()
            .filter_map(|key| trait_str(&traits, key))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    })
}

fn first_name(payload: &Payload<'_>) -> Option<String> {
    let traits = payload.traits();
    trait_str(&traits, "firstName").or_else(|| {
        trait_str(&traits, "name")
            .and_then(|name| name.split_whitespace().next().map(str::to_string))
    })
}

fn last_name(payload: &Payload<'_>) -> Option<String> {
    let traits = payload.traits();
    trait_str(&traits, "lastName").or_else(|| {
        let name = trait_str(&traits, "name")?;
        let (_, rest) = name.split_once(char::is_whitespace)?;
        Some(rest.trim().to_string()).filter(|rest| !rest.is_empty())
    })
}

fn created(payload: &Payload<'_>) -> Option<OffsetDateTime> {
    let traits = Value::Object(payload.traits());
    ["created", "createdAt"].iter().find_map(|key| {
        read_path(&traits, key, Coercion::Temporal).and_then(|d| d.as_date())
    })
}

/// Derived trait values consulted by trait aliasing.
pub(crate) fn derived_trait(payload: &Payload<'_>, key: &str) -> Option<Value> {
    match key {
        "email" => email(payload).map(Value::String),
        "name" => name(payload).map(Value::String),
        "firstName" => first_name(payload).map(Value::String),
        "lastName" => last_name(payload).map(Value::String),
        "created" => created(payload).map(|date| Datum::Date(date).to_json()),
        _ => None,
    }
}

impl<'a> From<Payload<'a>> for Identify<'a> {
    fn from(payload: Payload<'a>) -> Self {
        Identify {
            payload: payload.with_kind(MessageKind::Identify),
        }
    }
}

impl<'a> Deref for Identify<'a> {
    type Target = Payload<'a>;

    fn deref(&self) -> &Payload<'a> {
        &self.payload
    }
}
