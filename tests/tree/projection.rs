//! Projection Tests
//!
//! A node built from a JSON value projects back to the same value; arrays
//! are rebuilt from their children by index.

use crate::common::*;
use proptest::prelude::*;

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn nested_document_round_trips() {
    let value = json(
        r#"{
            "name": "firetest",
            "version": 1,
            "ratio": 0.5,
            "enabled": false,
            "tags": ["a", "b"],
            "matrix": [[1, 2], [3, 4]],
            "owner": {"id": 7, "roles": ["admin"]}
        }"#,
    );
    let doc = Document::from_value(&value).unwrap();
    assert_eq!(doc.objectify(), value);
}

#[test]
fn scalars_round_trip() {
    for literal in ["\"text\"", "42", "-3", "2.25", "true", "false"] {
        let value = json(literal);
        assert_eq!(doc(literal).objectify(), value, "literal {}", literal);
    }
}

#[test]
fn null_is_an_empty_node() {
    let doc = doc("null");
    assert!(doc.is_empty());
    assert_eq!(doc.objectify(), Value::Null);
}

#[test]
fn unsupported_kinds_are_rejected() {
    assert!(Document::from_value(&Value::Bytes(vec![1, 2])).is_err());
    assert!(Document::from_value(&Value::Float(f64::NAN)).is_err());

    let nested = Value::Array(vec![Value::Int(1), Value::Float(f64::INFINITY)]);
    assert!(Document::from_value(&nested).is_err());
}

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-z]{0,6}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(serde_json::Value::from),
            prop::collection::btree_map("[a-z]{1,4}", inner, 1..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn json_round_trips_through_the_tree(raw in arb_json()) {
        let value = Value::from(raw);
        let mut tree = Tree::new();
        tree.add(&Path::from("root"), Document::from_value(&value).unwrap());
        prop_assert_eq!(tree.project(&Path::from("root")), value);
    }
}

// ============================================================================
// Arrays with gaps
// ============================================================================

#[test]
fn deleted_array_slot_shrinks_by_child_count() {
    let mut tree = Tree::new();
    tree.add(&Path::from("list"), doc(r#"["a", "b", "c"]"#));

    tree.delete(&Path::from("list/1"));

    // Two children remain, so the projection has two slots; index 2 no
    // longer fits and index 1 is a hole.
    assert_eq!(tree.project(&Path::from("list")), json(r#"["a", null]"#));
}

#[test]
fn deleted_last_slot_leaves_prefix() {
    let mut tree = Tree::new();
    tree.add(&Path::from("list"), doc(r#"[1, 2, 3]"#));

    tree.delete(&Path::from("list/2"));

    assert_eq!(tree.project(&Path::from("list")), json("[1, 2]"));
}

#[test]
fn merged_index_into_array_extends_by_child_count() {
    let mut tree = Tree::new();
    tree.add(&Path::from("list"), doc(r#"[10, 20]"#));

    tree.update(&Path::from("list"), doc(r#"{"2": 30}"#));

    assert_eq!(tree.project(&Path::from("list")), json("[10, 20, 30]"));
}
