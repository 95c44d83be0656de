use cellpipe::{Value, parse_expression, resolve};
use std::collections::HashMap;

fn json_object(pairs: Vec<(&str, Value)>) -> Value {
    let mut map = HashMap::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v);
    }
    Value::Object(map)
}

fn json_array(values: Vec<Value>) -> Value {
    Value::Array(values)
}

fn resolve_path(doc: &Value, path: &str) -> Value {
    resolve(doc, &parse_expression(path).segments)
}

fn review_doc() -> Value {
    json_object(vec![(
        "doc",
        json_object(vec![
            ("title", Value::String("HelloWorld".into())),
            ("rating", Value::Integer(4)),
            (
                "votes",
                json_array(vec![
                    json_object(vec![("value", Value::String("3".into()))]),
                    json_object(vec![("value", Value::Integer(4))]),
                    json_object(vec![("value", Value::String("x".into()))]),
                ]),
            ),
        ]),
    )])
}

#[test]
fn test_nested_field_access() {
    let doc = review_doc();

    assert_eq!(
        resolve_path(&doc, "doc.title"),
        Value::String("HelloWorld".into())
    );
    assert_eq!(resolve_path(&doc, "doc.rating"), Value::Integer(4));
}

#[test]
fn test_indexed_access() {
    let doc = review_doc();

    assert_eq!(
        resolve_path(&doc, "doc.votes[1].value"),
        Value::Integer(4)
    );
}

#[test]
fn test_index_out_of_bounds_is_null() {
    let doc = review_doc();

    assert_eq!(resolve_path(&doc, "doc.votes[9].value"), Value::Null);
}

#[test]
fn test_wildcard_maps_every_element() {
    let doc = review_doc();

    assert_eq!(
        resolve_path(&doc, "doc.votes[*].value"),
        json_array(vec![
            Value::String("3".into()),
            Value::Integer(4),
            Value::String("x".into()),
        ])
    );
}

#[test]
fn test_wildcard_preserves_length_with_null_holes() {
    let doc = json_object(vec![(
        "items",
        json_array(vec![
            json_object(vec![("v", Value::Integer(1))]),
            json_object(vec![("other", Value::Integer(2))]),
            Value::Null,
        ]),
    )]);

    // Unresolved elements stay as nulls; nothing is dropped.
    assert_eq!(
        resolve_path(&doc, "items[*].v"),
        json_array(vec![Value::Integer(1), Value::Null, Value::Null])
    );
}

#[test]
fn test_missing_prefix_short_circuits_to_null() {
    let doc = review_doc();

    assert_eq!(resolve_path(&doc, "doc.missing.deeper.still"), Value::Null);
    assert_eq!(resolve_path(&doc, "nothere.title"), Value::Null);
}

#[test]
fn test_qualifier_over_non_array_is_null() {
    let doc = review_doc();

    // title is a string: both index and wildcard refuse to traverse.
    assert_eq!(resolve_path(&doc, "doc.title[0]"), Value::Null);
    assert_eq!(resolve_path(&doc, "doc.title[*]"), Value::Null);
    assert_eq!(resolve_path(&doc, "doc.rating[*].x"), Value::Null);
}

#[test]
fn test_wildcard_over_non_array_is_null_not_empty() {
    let doc = json_object(vec![("scalar", Value::Integer(7))]);

    let resolved = resolve_path(&doc, "scalar[*]");
    assert_eq!(resolved, Value::Null);
    assert_ne!(resolved, json_array(vec![]));
}

#[test]
fn test_lookup_on_scalar_is_null() {
    let doc = review_doc();

    assert_eq!(resolve_path(&doc, "doc.rating.nested"), Value::Null);
}

#[test]
fn test_empty_path_returns_document() {
    let doc = review_doc();

    assert_eq!(resolve(&doc, &[]), doc);
}

#[test]
fn test_resolution_is_idempotent_and_non_mutating() {
    let doc = review_doc();
    let before = doc.clone();

    let first = resolve_path(&doc, "doc.votes[*].value");
    let second = resolve_path(&doc, "doc.votes[*].value");

    assert_eq!(first, second);
    assert_eq!(doc, before);
}
