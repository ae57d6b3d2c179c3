//! Path resolution properties checked over a fixture tree.
//!
//! For every path, `resolve_or` must return the fallback exactly when some
//! prefix of the path is missing or cannot be descended into, and the
//! terminal value otherwise.

use facade_core::{proxy, resolve, resolve_or, Datum, Field, Multi, One};
use serde_json::{json, Value};

fn fixture() -> Value {
    json!({
        "name": "Flight of the Conchords",
        "members": {
            "Brett": "Likes animals",
            "Jemaine": "Rock and roll",
            "Murray": "Band manager"
        },
        "band": { "meeting": { "present": true, "notes": null, "count": 0 } },
        "gigs": [{ "city": "Wellington" }, { "city": "New York" }],
        "empty": {}
    })
}

/// Reference walk: descend only through objects and arrays.
fn expected(tree: &Value, path: &str) -> Option<Value> {
    let mut node = tree;
    for key in path.split('.') {
        node = match node {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node.clone())
}

#[test]
fn fallback_iff_some_prefix_is_unresolved() {
    let tree = fixture();
    let fallback = json!("__absent__");
    let paths = [
        "name",
        "name.length",
        "members",
        "members.Brett",
        "members.Bret",
        "members.Brett.age",
        "band.meeting.present",
        "band.meeting.notes",
        "band.meeting.count",
        "band.meeting.notes.text",
        "band.practice",
        "gigs.0.city",
        "gigs.1.city",
        "gigs.2.city",
        "gigs.one",
        "empty",
        "empty.anything",
        "missing.deeply.nested",
    ];

    for path in paths {
        let got = resolve_or(&tree, path, fallback.clone()).into_owned();
        match expected(&tree, path) {
            Some(value) => assert_eq!(got, value, "path {path}"),
            None => assert_eq!(got, fallback, "path {path}"),
        }
    }
}

#[test]
fn falsy_terminal_values_are_returned() {
    let tree = fixture();
    assert_eq!(resolve(&tree, "band.meeting.count").as_deref(), Some(&json!(0)));
    assert_eq!(resolve(&tree, "band.meeting.notes").as_deref(), Some(&Value::Null));
    assert_eq!(resolve(&tree, "empty").as_deref(), Some(&json!({})));
}

#[test]
fn resolution_does_not_mutate_the_tree() {
    let tree = fixture();
    let before = tree.clone();
    let _ = resolve(&tree, "members.Brett");
    let _ = proxy(&tree, "band");
    let _ = Multi::new("gig").read(&tree);
    assert_eq!(tree, before);
}

#[test]
fn accessors_are_idempotent() {
    let tree = fixture();
    let members = Field::new("members");
    assert_eq!(members.read(&tree), members.read(&tree));
    assert_eq!(members.read(&tree), proxy(&tree, "members"));

    let gigs = Multi::new("gig");
    assert_eq!(gigs.read(&tree), gigs.read(&tree));
    assert_eq!(gigs.read(&tree).len(), 2);
    assert_eq!(
        One::new("gig").read(&tree).and_then(|g| g.get("city").cloned()),
        Some(Datum::Text("Wellington".to_string()))
    );
}
