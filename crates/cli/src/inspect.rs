//! `facade inspect`: the normalized view of one payload.

use std::process;

use facade_integrations::Resolver;
use facade_message::{Alias, Datum, Group, Identify, MessageKind, Page, Payload, Screen, Track};
use serde_json::{json, Map, Value};

use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_inspect(
    raw: &Value,
    kind: Option<MessageKind>,
    resolver: Resolver,
    output: OutputFormat,
) {
    let payload = match Payload::new(raw) {
        Ok(p) => p.with_resolver(resolver),
        Err(e) => {
            report_error(&e.to_string(), output);
            process::exit(1);
        }
    };
    let kind = kind.or_else(|| MessageKind::detect(raw));
    let view = normalized_view(payload, kind);

    match output {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => print_text(&view),
    }
}

/// Every shared accessor, plus the variant fields when the kind is known.
fn normalized_view(payload: Payload<'_>, kind: Option<MessageKind>) -> Value {
    let mut view = Map::new();
    view.insert("kind".into(), json!(kind));
    view.insert("user_id".into(), json!(payload.user_id()));
    view.insert("anonymous_id".into(), json!(payload.anonymous_id()));
    view.insert("message_id".into(), json!(payload.message_id()));
    view.insert("timestamp".into(), Datum::from(payload.timestamp()).to_json());
    view.insert("active".into(), json!(payload.active()));
    view.insert("channel".into(), json!(payload.channel()));
    view.insert("traits".into(), Value::Object(payload.traits()));
    view.insert("library".into(), json!(payload.library()));
    view.insert("device".into(), Value::Object(payload.device()));
    view.insert(
        "location".into(),
        json!({
            "city": payload.city(),
            "country": payload.country(),
            "state": payload.state(),
            "region": payload.region(),
            "street": payload.street(),
            "zip": payload.zip(),
        }),
    );

    let (variant, payload) = match kind {
        Some(kind) => variant_fields(payload, kind),
        None => (Value::Null, payload),
    };
    view.insert("variant".into(), variant);
    view.insert("json".into(), payload.json());
    Value::Object(view)
}

fn variant_fields(payload: Payload<'_>, kind: MessageKind) -> (Value, Payload<'_>) {
    match kind {
        MessageKind::Track => {
            let track = Track::from(payload);
            let fields = json!({
                "event": track.event(),
                "properties": track.properties(),
                "revenue": track.revenue(),
                "currency": track.currency(),
                "value": track.value(),
            });
            (fields, Payload::clone(&track))
        }
        MessageKind::Identify => {
            let identify = Identify::from(payload);
            let fields = json!({
                "email": identify.email(),
                "name": identify.name(),
                "first_name": identify.first_name(),
                "last_name": identify.last_name(),
                "username": identify.username(),
                "created": identify.created().map(|d| Datum::from(d).to_json()),
            });
            (fields, Payload::clone(&identify))
        }
        MessageKind::Group => {
            let group = Group::from(payload);
            let fields = json!({
                "group_id": group.group_id(),
                "name": group.name(),
                "industry": group.industry(),
                "employees": group.employees(),
                "properties": group.properties(),
            });
            (fields, Payload::clone(&group))
        }
        MessageKind::Page => {
            let page = Page::from(payload);
            let fields = page_fields(&page);
            (fields, Payload::clone(&page))
        }
        MessageKind::Screen => {
            let screen = Screen::from(payload);
            let fields = page_fields(&screen);
            (fields, Payload::clone(&screen))
        }
        MessageKind::Alias => {
            let alias = Alias::from(payload);
            let fields = json!({
                "previous_id": alias.previous_id(),
                "user_id": alias.user_id(),
            });
            (fields, Payload::clone(&alias))
        }
    }
}

fn page_fields(page: &Page<'_>) -> Value {
    json!({
        "name": page.name(),
        "category": page.category(),
        "full_name": page.full_name(),
        "properties": page.properties(),
        "url": page.url(),
        "path": page.path(),
        "referrer": page.referrer(),
        "title": page.title(),
        "search": page.search(),
    })
}

fn print_text(view: &Value) {
    let Some(fields) = view.as_object() else {
        return;
    };
    for (key, value) in fields {
        match value {
            Value::Null => continue,
            Value::String(s) => println!("{}: {}", key, s),
            other => println!("{}: {}", key, other),
        }
    }
}
