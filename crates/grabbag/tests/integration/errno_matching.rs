//! Integration tests for errno classification.

use std::io;

use grabbag::{Error, ErrnoCode, is_errno_like, matches_code, matches_code_value};
use serde_json::{Value, json};

use crate::common::enoent;

#[test]
fn test_enoent_matches_by_name_and_number() {
    let err = enoent();
    assert!(is_errno_like(&err));
    assert!(matches_code(Some(&err), &ErrnoCode::from("ENOENT")));
    assert!(matches_code(Some(&err), &ErrnoCode::from(-2)));
}

#[test]
fn test_null_code_is_invalid_argument() {
    let err = enoent();
    let result = matches_code_value(Some(&err), &Value::Null);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_absent_error_never_fails() {
    for code in [json!("ENOENT"), json!(-2), Value::Null, json!({"x": 1})] {
        assert!(!matches_code_value(None, &code).expect("absent error should not fail"));
    }
}

#[cfg(unix)]
#[test]
fn test_real_filesystem_error() {
    let err = std::fs::read("/definitely/not/a/grabbag/path").unwrap_err();
    assert!(is_errno_like(&err));
    assert!(matches_code_value(Some(&err), &json!("ENOENT")).unwrap());
    assert!(!matches_code_value(Some(&err), &json!("EACCES")).unwrap());
}

#[test]
fn test_boxed_error_classification() {
    let boxed: Box<dyn std::error::Error> = Box::new(enoent());
    assert!(is_errno_like(boxed.as_ref()));

    let plain: Box<dyn std::error::Error> = Box::new(io::Error::other("no code"));
    assert!(!is_errno_like(plain.as_ref()));
}
