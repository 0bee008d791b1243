//! Error Handling Tests
//!
//! Rejected payloads surface as typed errors and never touch the tree.

use crate::common::*;
use firetest::Error;

#[test]
fn bytes_payload_is_unsupported() {
    let executor = Executor::new();

    let err = executor
        .execute(Command::Set {
            path: "blob".into(),
            value: Value::Bytes(vec![0xde, 0xad]),
        })
        .unwrap_err();

    match err {
        Error::UnsupportedValueKind { kind } => assert_eq!(kind, "Bytes"),
        other => panic!("Expected UnsupportedValueKind, got {:?}", other),
    }
    assert!(executor.tree().lock().is_empty());
}

#[test]
fn nested_unsupported_value_rejects_whole_payload() {
    let executor = Executor::new();
    set(&executor, "doc", r#"{"keep": 1}"#);

    let mut fields = std::collections::HashMap::new();
    fields.insert("ok".to_string(), Value::Int(2));
    fields.insert("bad".to_string(), Value::Float(f64::NAN));

    let err = executor
        .execute(Command::Update {
            path: "doc".into(),
            value: Value::Object(fields),
        })
        .unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(get(&executor, "doc"), json(r#"{"keep": 1}"#));
}

#[test]
fn rejected_push_consumes_no_key_slot() {
    let executor = Executor::new();
    let err = executor
        .execute(Command::Push {
            path: "list".into(),
            value: Value::Bytes(vec![]),
        })
        .unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(get(&executor, "list"), Value::Null);
}

#[test]
fn error_messages_name_the_kind() {
    let err = Error::UnsupportedValueKind {
        kind: "Bytes".into(),
    };
    assert!(err.to_string().contains("Bytes"));
}
