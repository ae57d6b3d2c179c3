use std::ops::Deref;

use facade_core::{FacadeError, Field};
use serde_json::{Map, Value};

use crate::kind::MessageKind;
use crate::payload::Payload;
use crate::track::number_like;

const GROUP_ID: Field = Field::new("groupId");
const NAME: Field = Field::new("traits.name");
const INDUSTRY: Field = Field::new("traits.industry");
const EMPLOYEES: Field = Field::new("traits.employees");

/// A `group` message: associates a user with an account or organization.
///
/// The group's own traits live in the top-level `traits` object (legacy
/// producers send `properties`); user traits stay under `context.traits`.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    payload: Payload<'a>,
}

impl<'a> Group<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, FacadeError> {
        Payload::new(raw).map(Group::from)
    }

    /// The top-level `groupId`, falling back to `context.groupId`.
    pub fn group_id(&self) -> Option<String> {
        self.str_at(GROUP_ID).or_else(|| self.payload.group_id())
    }

    pub fn name(&self) -> Option<String> {
        self.str_at(NAME)
    }

    pub fn industry(&self) -> Option<String> {
        self.str_at(INDUSTRY)
    }

    pub fn employees(&self) -> Option<u64> {
        let employees = number_like(&EMPLOYEES.read(&self.payload)?)?;
        (employees >= 0.0 && employees.fract() == 0.0).then_some(employees as u64)
    }

    /// Group traits: top-level `traits`, else legacy `properties`.
    pub fn properties(&self) -> Map<String, Value> {
        let traits = self.object_at("traits");
        if traits.is_empty() {
            self.object_at("properties")
        } else {
            traits
        }
    }
}

impl<'a> From<Payload<'a>> for Group<'a> {
    fn from(payload: Payload<'a>) -> Self {
        Group {
            payload: payload.with_kind(MessageKind::Group),
        }
    }
}

impl<'a> Deref for Group<'a> {
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
    fn group_fields() {
        let raw = json!({
            "groupId": "initech",
            "traits": { "name": "Initech", "employees": "120", "industry": "Software" },
            "context": { "groupId": "ignored", "traits": { "email": "peter@initech.com" } }
        });
        let group = Group::new(&raw).unwrap();
        assert_eq!(group.group_id().as_deref(), Some("initech"));
        assert_eq!(group.name().as_deref(), Some("Initech"));
        assert_eq!(group.employees(), Some(120));
        assert_eq!(group.industry().as_deref(), Some("Software"));
        assert_eq!(group.properties().get("name"), Some(&json!("Initech")));
        assert_eq!(group.traits().get("email"), Some(&json!("peter@initech.com")));
    }

    #[test]
    fn group_id_falls_back_to_context() {
        let raw = json!({ "context": { "groupId": "legacy" }, "properties": { "plan": "gold" } });
        let group = Group::new(&raw).unwrap();
        assert_eq!(group.group_id().as_deref(), Some("legacy"));
        assert_eq!(group.properties().get("plan"), Some(&json!("gold")));
        assert_eq!(group.employees(), None);
    }
}
