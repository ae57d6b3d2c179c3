use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

/// The known message variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Track,
    Identify,
    Group,
    Page,
    Screen,
    Alias,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        MessageKind::Track,
        MessageKind::Identify,
        MessageKind::Group,
        MessageKind::Page,
        MessageKind::Screen,
        MessageKind::Alias,
    ];

    /// The value written to `type` by `json()`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Track => "track",
            MessageKind::Identify => "identify",
            MessageKind::Group => "group",
            MessageKind::Page => "page",
            MessageKind::Screen => "screen",
            MessageKind::Alias => "alias",
        }
    }

    /// The kind named by a raw tree's `type` (or legacy `action`) field.
    pub fn detect(raw: &Value) -> Option<MessageKind> {
        ["type", "action"]
            .iter()
            .filter_map(|key| raw.get(*key).and_then(Value::as_str))
            .find_map(|name| name.parse().ok())
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that does not name a message kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown message kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for MessageKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Track".parse::<MessageKind>(), Ok(MessageKind::Track));
        assert_eq!("screen".parse::<MessageKind>(), Ok(MessageKind::Screen));
        assert_eq!(
            "order".parse::<MessageKind>(),
            Err(UnknownKind("order".to_string()))
        );
    }

    #[test]
    fn detects_type_then_action() {
        assert_eq!(
            MessageKind::detect(&json!({ "type": "identify" })),
            Some(MessageKind::Identify)
        );
        assert_eq!(MessageKind::detect(&json!({ "action": "Alias" })), Some(MessageKind::Alias));
        assert_eq!(
            MessageKind::detect(&json!({ "type": "bogus", "action": "page" })),
            Some(MessageKind::Page)
        );
        assert_eq!(MessageKind::detect(&json!({})), None);
    }
}
