//! Client library and device information.

use facade_integrations::source::context_root;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::payload::Payload;

/// Library name suffixes and the device type they imply.
pub const LIBRARY_DEVICE_TYPES: &[(&str, &str)] = &[("-ios", "ios"), ("-android", "android")];

/// The client library that produced a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Library {
    pub name: String,
    pub version: Option<Value>,
}

impl Library {
    pub fn unknown() -> Self {
        Library {
            name: "unknown".to_string(),
            version: None,
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Library {
                name: name.clone(),
                version: None,
            },
            Value::Object(map) => Library {
                name: map
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
                version: map.get("version").filter(|v| !v.is_null()).cloned(),
            },
            _ => Library::unknown(),
        }
    }
}

/// The device type implied by a library name, if any.
pub fn infer_device_type(library_name: &str) -> Option<&'static str> {
    let name = library_name.to_ascii_lowercase();
    LIBRARY_DEVICE_TYPES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, device_type)| *device_type)
}

impl Payload<'_> {
    /// `library` from the context (or legacy options), accepting either a
    /// bare name or a `{name, version}` object.
    pub fn library(&self) -> Library {
        context_root(self.raw())
            .and_then(|context| context.get("library"))
            .filter(|library| !library.is_null())
            .map(Library::from_value)
            .unwrap_or_else(Library::unknown)
    }

    /// `context.device`, with `type` inferred from the library name when
    /// the message does not set it.
    pub fn device(&self) -> Map<String, Value> {
        let mut device = self.context_object("device");
        let has_type = device.get("type").is_some_and(|t| !t.is_null());
        if !has_type {
            if let Some(device_type) = infer_device_type(&self.library().name) {
                device.insert("type".to_string(), Value::String(device_type.to_string()));
            }
        }
        device
    }
}
