use cellpipe::cli::{TableOptions, execute_table};
use cellpipe::{Evaluator, Pipe, PipeError, Value};
use chrono::{Duration, Utc};
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

fn review_doc() -> Value {
    json_object(vec![(
        "doc",
        json_object(vec![
            ("id", Value::String("00000000000000000000000000".into())),
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
fn test_null_document_is_unchanged() {
    let evaluator = Evaluator::new();
    assert_eq!(evaluator.eval(&Value::Null, "doc.title"), Value::Null);
}

#[test]
fn test_blank_expression_returns_document() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    assert_eq!(evaluator.eval(&doc, ""), doc);
    assert_eq!(evaluator.eval(&doc, "   "), doc);
}

#[test]
fn test_path_only_expression() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    assert_eq!(
        evaluator.eval(&doc, "doc.title"),
        Value::String("HelloWorld".into())
    );
}

#[test]
fn test_slice_chain() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    assert_eq!(
        evaluator.eval(&doc, "doc.title | slice:0:5"),
        Value::String("Hello".into())
    );
}

#[test]
fn test_unregistered_pipe_is_a_no_op() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    assert_eq!(
        evaluator.eval(&doc, "doc.title | bogusPipe"),
        evaluator.eval(&doc, "doc.title")
    );
}

#[test]
fn test_empty_register_passes_everything_through() {
    let evaluator = Evaluator::empty();
    let doc = review_doc();

    assert_eq!(
        evaluator.eval(&doc, "doc.title | slice:0:5"),
        Value::String("HelloWorld".into())
    );
}

#[test]
fn test_faulting_stage_keeps_running_value() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    // rating is an integer: uppercase faults and the value carries over
    // into the next stage untouched.
    assert_eq!(
        evaluator.eval(&doc, "doc.rating | uppercase"),
        Value::Integer(4)
    );
    assert_eq!(
        evaluator.eval(&doc, "doc.rating | uppercase | number:\"1.2-2\""),
        Value::String("4.00".into())
    );
}

#[test]
fn test_votes_sum_column() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    assert_eq!(
        evaluator.eval(&doc, "doc.votes[*].value | sum"),
        Value::Integer(7)
    );
}

#[test]
fn test_age_column_chain() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    // The all-zero id decodes to the epoch; the age column then renders in
    // whole years.
    let rendered = evaluator.eval(&doc, "doc.id | ulidToDate | timeago");
    let Value::String(age) = rendered else {
        panic!("expected a rendered age string");
    };
    assert!(age.ends_with('y'), "age `{age}` should be in years");
    let count: i64 = age[..age.len() - 1].parse().expect("numeric count");
    assert!(count >= 56);
}

#[test]
fn test_quoted_arguments() {
    let evaluator = Evaluator::new();
    let doc = review_doc();

    assert_eq!(
        evaluator.eval(&doc, "doc.title | slice:\"0\":\"5\""),
        Value::String("Hello".into())
    );
}

#[test]
fn test_eval_is_idempotent_and_non_mutating() {
    let evaluator = Evaluator::new();
    let doc = review_doc();
    let before = doc.clone();

    let first = evaluator.eval(&doc, "doc.votes[*].value | sum");
    let second = evaluator.eval(&doc, "doc.votes[*].value | sum");

    assert_eq!(first, second);
    assert_eq!(doc, before);
}

struct Reverse;

impl Pipe for Reverse {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        match value {
            Value::String(s) => Ok(Value::String(s.chars().rev().collect())),
            _ => Ok(value.clone()),
        }
    }
}

#[test]
fn test_hosting_layer_can_register_pipes() {
    let mut evaluator = Evaluator::new();
    evaluator.register("reverse", Box::new(Reverse));
    let doc = review_doc();

    assert_eq!(
        evaluator.eval(&doc, "doc.title | reverse | slice:0:5"),
        Value::String("dlroW".into())
    );
    assert!(evaluator.pipe_names().contains(&"reverse"));
}

#[test]
fn test_timeago_on_recent_timestamp_field() {
    let evaluator = Evaluator::new();
    let doc = json_object(vec![(
        "created",
        Value::Timestamp(Utc::now() - Duration::seconds(90)),
    )]);

    assert_eq!(
        evaluator.eval(&doc, "created | timeago"),
        Value::String("1m".into())
    );
}

#[test]
fn test_table_rendering_from_couchdb_envelope() {
    let input = r#"{
        "total_rows": 2,
        "offset": 0,
        "rows": [
            {"id": "a", "doc": {"title": "First review here", "votes": [{"value": 1}, {"value": "2"}]}},
            {"id": "b", "doc": {"title": "Second", "votes": []}}
        ]
    }"#;

    let options = TableOptions {
        cells: vec![
            "doc.title | slice:0:6".to_string(),
            "doc.votes[*].value | sum".to_string(),
        ],
        input: Some(input.to_string()),
    };
    let rendered = execute_table(&options).expect("table renders");

    assert_eq!(
        rendered,
        serde_json::json!([["First ", 3], ["Second", 0]])
    );
}

#[test]
fn test_table_rendering_from_plain_array() {
    let input = r#"[{"doc": {"rating": 5}}]"#;

    let options = TableOptions {
        cells: vec!["doc.rating".to_string()],
        input: Some(input.to_string()),
    };
    let rendered = execute_table(&options).expect("table renders");

    assert_eq!(rendered, serde_json::json!([[5]]));
}
