use std::ops::Deref;

use facade_core::{Datum, FacadeError, Field};
use serde_json::{Map, Value};

use crate::kind::MessageKind;
use crate::payload::Payload;

const EVENT: Field = Field::new("event");
const REVENUE: Field = Field::new("properties.revenue");
const CURRENCY: Field = Field::new("properties.currency");
const VALUE: Field = Field::new("properties.value");

/// A `track` message: a named event with properties.
#[derive(Debug, Clone)]
pub struct Track<'a> {
    payload: Payload<'a>,
}

impl<'a> Track<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, FacadeError> {
        Payload::new(raw).map(Track::from)
    }

    pub fn event(&self) -> Option<String> {
        self.str_at(EVENT)
    }

    /// `properties`, defaulting to an empty object.
    pub fn properties(&self) -> Map<String, Value> {
        self.object_at("properties")
    }

    /// `properties.revenue`, accepting numbers and numeric strings such as
    /// `"$19.99"`.
    pub fn revenue(&self) -> Option<f64> {
        REVENUE.read(&self.payload).as_ref().and_then(number_like)
    }

    /// `properties.currency`, defaulting to `USD`.
    pub fn currency(&self) -> String {
        self.str_at(CURRENCY).unwrap_or_else(|| "USD".to_string())
    }

    pub fn value(&self) -> Option<f64> {
        VALUE.read(&self.payload).as_ref().and_then(number_like)
    }
}

pub(crate) fn number_like(datum: &Datum) -> Option<f64> {
    match datum {
        Datum::Number(n) => n.as_f64(),
        Datum::Text(s) => s.trim().trim_start_matches('$').replace(',', "").parse().ok(),
        _ => None,
    }
}

impl<'a> From<Payload<'a>> for Track<'a> {
    fn from(payload: Payload<'a>) -> Self {
        Track {
            payload: payload.with_kind(MessageKind::Track),
        }
    }
}

impl<'a> Deref for Track<'a> {
    type Target = Payload<'a>;

    fn deref(&self) -> &Payload<'a> {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_and_properties() {
        let raw = json!({ "event": "Completed Order", "properties": { "revenue": "$1,024.50" } });
        let track = Track::new(&raw).unwrap();
        assert_eq!(track.event().as_deref(), Some("Completed Order"));
        assert_eq!(track.revenue(), Some(1024.5));
        assert_eq!(track.currency(), "USD");
        assert_eq!(track.value(), None);
    }

    #[test]
    fn missing_properties_are_empty() {
        let raw = json!({});
        let track = Track::new(&raw).unwrap();
        assert!(track.properties().is_empty());
        assert_eq!(track.revenue(), None);
    }
}
