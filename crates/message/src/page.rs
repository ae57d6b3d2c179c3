use std::ops::Deref;

use facade_core::{FacadeError, Field};
use serde_json::{Map, Value};

use crate::kind::MessageKind;
use crate::payload::Payload;

const NAME: Field = Field::new("name");
const CATEGORY: Field = Field::new("category");

/// A `page` message: a page view, with page details in `properties`
/// (falling back to `context.page`).
#[derive(Debug, Clone)]
pub struct Page<'a> {
    payload: Payload<'a>,
}

impl<'a> Page<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, FacadeError> {
        Payload::new(raw).map(Page::from)
    }

    pub fn name(&self) -> Option<String> {
        self.str_at(NAME)
    }

    pub fn category(&self) -> Option<String> {
        self.str_at(CATEGORY)
    }

    /// `"<category> <name>"` when both are set, else whichever is.
    pub fn full_name(&self) -> Option<String> {
        match (self.category(), self.name()) {
            (Some(category), Some(name)) => Some(format!("{} {}", category, name)),
            (category, name) => name.or(category),
        }
    }

    /// `properties`, defaulting to an empty object.
    pub fn properties(&self) -> Map<String, Value> {
        self.object_at("properties")
    }

    pub fn url(&self) -> Option<String> {
        self.page_field("url")
    }

    pub fn path(&self) -> Option<String> {
        self.page_field("path")
    }

    pub fn referrer(&self) -> Option<String> {
        self.page_field("referrer")
    }

    pub fn title(&self) -> Option<String> {
        self.page_field("title")
    }

    pub fn search(&self) -> Option<String> {
        self.page_field("search")
    }

    fn page_field(&self, key: &str) -> Option<String> {
        [self.properties(), self.context_object("page")]
            .iter()
            .find_map(|source| source.get(key).and_then(Value::as_str).map(str::to_string))
    }
}

impl<'a> From<Payload<'a>> for Page<'a> {
    fn from(payload: Payload<'a>) -> Self {
        Page {
            payload: payload.with_kind(MessageKind::Page),
        }
    }
}

impl<'a> Deref for Page<'a> {
    type Target = Payload<'a>;

    fn deref(&self) -> &Payload<'a> {
        &self.payload
    }
}

/// A `screen` message: the mobile counterpart of [`Page`].
#[derive(Debug, Clone)]
pub struct Screen<'a> {
    page: Page<'a>,
}

impl<'a> Screen<'a> {
    pub fn new(raw: &'a Value) -> Result<Self, FacadeError> {
        Payload::new(raw).map(Screen::from)
    }
}

impl<'a> From<Payload<'a>> for Screen<'a> {
    fn from(payload: Payload<'a>) -> Self {
        Screen {
            page: Page {
                payload: payload.with_kind(MessageKind::Screen),
            },
        }
    }
}

impl<'a> Deref for Screen<'a> {
    type Target = Page<'a>;

    fn deref(&self) -> &Page<'a> {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_details_prefer_properties() {
        let raw = json!({
            "name": "Pricing",
            "category": "Docs",
            "properties": { "url": "https://example.com/pricing" },
            "context": { "page": { "url": "ignored", "title": "Pricing | Example" } }
        });
        let page = Page::new(&raw).unwrap();
        assert_eq!(page.full_name().as_deref(), Some("Docs Pricing"));
        assert_eq!(page.url().as_deref(), Some("https://example.com/pricing"));
        assert_eq!(page.title().as_deref(), Some("Pricing | Example"));
        assert_eq!(page.referrer(), None);
    }

    #[test]
    fn full_name_with_one_part() {
        let raw = json!({ "category": "Docs" });
        assert_eq!(Page::new(&raw).unwrap().full_name().as_deref(), Some("Docs"));
        let raw = json!({});
        assert_eq!(Page::new(&raw).unwrap().full_name(), None);
    }

    #[test]
    fn screens_report_their_own_kind() {
        let raw = json!({ "name": "Home" });
        let screen = Screen::new(&raw).unwrap();
        assert_eq!(screen.name().as_deref(), Some("Home"));
        assert_eq!(screen.kind(), Some(MessageKind::Screen));
        assert_eq!(screen.json()["type"], json!("screen"));
    }
}
