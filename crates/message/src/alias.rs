use std::ops::Deref;

use facade_core::{FacadeError, Field};
use serde_json::Value;

use crate::kind::MessageKind;
use crate::payload::Payload;

const PREVIOUS_ID: Field = Field::new("previousId");
const FROM: Field = Field::new("from");
const TO: Field = Field::new("to");

/// An `alias` message: merges a previous identity into a user id.
#[derive(Debug, Clone)]
pub struct Alias<'a> {
    payload: Payload<'a>,
}

impl<'a> Alias<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, FacadeError> {
        Payload::new(raw).map(Alias::from)
    }

    /// `previousId`, else legacy `from`.
    pub fn previous_id(&self) -> Option<String> {
        self.str_at(PREVIOUS_ID).or_else(|| self.str_at(FROM))
    }

    /// `userId`, else legacy `to`.
    pub fn user_id(&self) -> Option<String> {
        self.payload.user_id().or_else(|| self.str_at(TO))
    }
}

impl<'a> From<Payload<'a>> for Alias<'a> {
    fn from(payload: Payload<'a>) -> Self {
        Alias {
            payload: payload.with_kind(MessageKind::Alias),
        }
    }
}

impl<'a> Deref for Alias<'a> {
    type Target = Payload<'a>;

    fn deref(&self) -> &Payload<'a> {
        &self.payload
    }
}
