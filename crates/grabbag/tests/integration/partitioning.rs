//! Integration tests for key sets, disjointness, and partitioning.

use std::collections::HashSet;

use grabbag::{
    Error, KeyCollection, Object, Selector, assert_disjoint, assert_disjoint_values, key_set_of,
    select, select_values,
};
use serde_json::{Value, json};

use crate::common::object;

#[test]
fn test_key_set_of_defaults() {
    let keys = key_set_of(&object(json!({"a": 1, "b": 2})));
    let expected: HashSet<String> = HashSet::from(["a".to_string(), "b".to_string()]);
    assert_eq!(keys, expected);
}

#[test]
fn test_assert_disjoint_shared_key() {
    let err = assert_disjoint_values(&[json!(["a", "c"]), json!(["a", "b"])]).unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { ref key, .. } if key == "a"));
}

#[test]
fn test_assert_disjoint_passes() {
    assert!(assert_disjoint_values(&[json!(["a", "c"]), json!(["b", "d"])]).is_ok());
}

#[test]
fn test_three_way_split() {
    let buckets = select_values(
        &json!({"one": 1, "two": 2, "three": 3}),
        &[json!(["one"]), json!(["two"])],
    )
    .unwrap();
    assert_eq!(
        buckets,
        vec![
            object(json!({"one": 1})),
            object(json!({"two": 2})),
            object(json!({"three": 3})),
        ]
    );
}

#[test]
fn test_defaults_overridden_by_source() {
    let buckets = select_values(
        &json!({"one": 1, "two": 2}),
        &[json!({"one": 2, "two": 3, "four": 5})],
    )
    .unwrap();
    assert_eq!(buckets[0], object(json!({"one": 1, "two": 2, "four": 5})));
    assert_eq!(buckets[1], Object::new());
}

#[test]
fn test_null_and_selectorless_sources() {
    assert_eq!(select_values(&Value::Null, &[]).unwrap(), vec![Object::new()]);
    assert_eq!(
        select_values(&json!({"a": 1}), &[]).unwrap(),
        vec![object(json!({"a": 1}))]
    );
}

#[test]
fn test_options_splitting_workflow() {
    // Split caller options into client options, request options, and the rest,
    // after checking the two option groups do not overlap.
    let client_defaults = object(json!({"timeout": 30, "retries": 2}));
    let request_keys = ["method", "url"];

    assert_disjoint(&[
        KeyCollection::from(client_defaults.clone()),
        KeyCollection::from(request_keys),
    ])
    .unwrap();

    let options = object(json!({"url": "https://example.com", "retries": 5, "trace": true}));
    let buckets = select(
        Some(&options),
        &[
            Selector::defaults(client_defaults),
            Selector::keys(request_keys),
        ],
    );

    assert_eq!(buckets[0], object(json!({"timeout": 30, "retries": 5})));
    assert_eq!(buckets[1], object(json!({"url": "https://example.com"})));
    assert_eq!(buckets[2], object(json!({"trace": true})));
}

#[test]
fn test_identical_inputs_identical_outputs() {
    let source = object(json!({"a": 1, "b": [1, 2], "c": {"d": null}}));
    let selectors = [Selector::key_set(["b"]), Selector::keys(["c", "z"])];
    assert_eq!(
        select(Some(&source), &selectors),
        select(Some(&source), &selectors)
    );
}
