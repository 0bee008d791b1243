//! Route Tests
//!
//! Each request goes through the router in-process with
//! `tower::ServiceExt::oneshot`, against a shared executor that the test
//! inspects directly.

use crate::common::*;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use firetest::rest::{INVALID_DATA, MAX_DEPTH, MISSING_SUFFIX, NO_DATA, PATH_TOO_DEEP};
use firetest::router;
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }

    fn json(&self) -> Value {
        json(self.text())
    }
}

async fn send(executor: &Executor, method: Method, uri: &str, body: &str) -> Reply {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router(executor.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        content_type,
        body: body.to_vec(),
    }
}

// ============================================================================
// PUT
// ============================================================================

#[tokio::test]
async fn put_echoes_body_and_stores_value() {
    let executor = Executor::new();
    let body = r#"{"name": "ada",  "langs": ["en"]}"#;

    let reply = send(&executor, Method::PUT, "/users/ada.json", body).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), body);
    assert_eq!(get(&executor, "users/ada"), json(body));
}

#[tokio::test]
async fn put_replaces_subtree() {
    let executor = Executor::new();
    set(&executor, "k", r#"{"a": 1, "b": 2}"#);

    send(&executor, Method::PUT, "/k.json", r#"{"c": 3}"#).await;

    assert_eq!(get(&executor, "k"), json(r#"{"c": 3}"#));
}

#[tokio::test]
async fn put_root_path() {
    let executor = Executor::new();
    send(&executor, Method::PUT, "/.json", r#"{"top": true}"#).await;
    assert_eq!(get(&executor, ""), json(r#"{"top": true}"#));
}

#[tokio::test]
async fn put_without_body_is_rejected() {
    let executor = Executor::new();

    let reply = send(&executor, Method::PUT, "/k.json", "").await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), NO_DATA);
    assert!(executor.tree().lock().is_empty());
}

#[tokio::test]
async fn put_malformed_json_leaves_tree_unchanged() {
    let executor = Executor::new();
    set(&executor, "k", r#"{"a": 1}"#);

    let reply = send(&executor, Method::PUT, "/k.json", r#"{"a": "#).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), INVALID_DATA);
    assert_eq!(get(&executor, "k"), json(r#"{"a": 1}"#));
}

// ============================================================================
// PATCH
// ============================================================================

#[tokio::test]
async fn patch_merges_and_echoes_body() {
    let executor = Executor::new();
    set(&executor, "o", r#"{"x": 1, "y": 2}"#);
    let body = r#"{"y": 3, "z": 4}"#;

    let reply = send(&executor, Method::PATCH, "/o.json", body).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), body);
    assert_eq!(get(&executor, "o"), json(r#"{"x": 1, "y": 3, "z": 4}"#));
}

#[tokio::test]
async fn patch_malformed_json_leaves_tree_unchanged() {
    let executor = Executor::new();
    set(&executor, "o", r#"{"x": 1}"#);

    let reply = send(&executor, Method::PATCH, "/o.json", "{x: 2}").await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), INVALID_DATA);
    assert_eq!(get(&executor, "o"), json(r#"{"x": 1}"#));
}

#[tokio::test]
async fn patch_without_body_is_rejected() {
    let executor = Executor::new();
    let reply = send(&executor, Method::PATCH, "/o.json", "").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), NO_DATA);
}

// ============================================================================
// POST
// ============================================================================

#[tokio::test]
async fn post_returns_generated_name() {
    let executor = Executor::new();

    let reply = send(&executor, Method::POST, "/msgs.json", r#""hello""#).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.text().ends_with('\n'));
    let name = match reply.json() {
        Value::Object(fields) => fields["name"].as_str().unwrap().to_string(),
        other => panic!("Expected Object, got {:?}", other),
    };
    assert_eq!(get(&executor, &format!("msgs/{}", name)), json(r#""hello""#));
}

#[tokio::test]
async fn back_to_back_posts_yield_distinct_retrievable_keys() {
    let executor = Executor::new();

    let first = send(&executor, Method::POST, "/list.json", "1").await.json();
    let second = send(&executor, Method::POST, "/list.json", "2").await.json();
    let first = first.as_object().unwrap()["name"].as_str().unwrap().to_string();
    let second = second.as_object().unwrap()["name"].as_str().unwrap().to_string();

    assert_ne!(first, second);

    let reply = send(&executor, Method::GET, &format!("/list/{}.json", first), "").await;
    assert_eq!(reply.json(), Value::Int(1));
    let reply = send(&executor, Method::GET, &format!("/list/{}.json", second), "").await;
    assert_eq!(reply.json(), Value::Int(2));
}

#[tokio::test]
async fn post_malformed_json_creates_nothing() {
    let executor = Executor::new();

    let reply = send(&executor, Method::POST, "/list.json", "[1,").await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), INVALID_DATA);
    assert_eq!(get(&executor, "list"), Value::Null);
}

// ============================================================================
// GET
// ============================================================================

#[tokio::test]
async fn get_returns_projection_as_json_line() {
    let executor = Executor::new();
    set(&executor, "a", r#"{"b": [1, 2]}"#);

    let reply = send(&executor, Method::GET, "/a.json", "").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    assert_eq!(reply.text(), "{\"b\":[1,2]}\n");
}

#[tokio::test]
async fn get_missing_path_is_null() {
    let executor = Executor::new();

    let reply = send(&executor, Method::GET, "/nothing/here.json", "").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), "null\n");
}

#[tokio::test]
async fn get_ignores_query_string() {
    let executor = Executor::new();
    set(&executor, "a", "1");

    let reply = send(&executor, Method::GET, "/a.json?print=pretty", "").await;

    assert_eq!(reply.text(), "1\n");
}

#[tokio::test]
async fn empty_segments_are_ignored() {
    let executor = Executor::new();
    set(&executor, "a/b", "true");

    let reply = send(&executor, Method::GET, "/a//b.json", "").await;

    assert_eq!(reply.text(), "true\n");
}

#[tokio::test]
async fn percent_encoded_keys_are_decoded() {
    let executor = Executor::new();

    send(&executor, Method::PUT, "/users/a%20b.json", r#""x""#).await;
    send(&executor, Method::PUT, "/users/%C3%A9t%C3%A9.json", "1").await;

    let reply = send(&executor, Method::GET, "/users.json", "").await;
    assert_eq!(reply.json(), json(r#"{"a b": "x", "été": 1}"#));

    let reply = send(&executor, Method::GET, "/users/a%20b.json", "").await;
    assert_eq!(reply.text(), "\"x\"\n");
}

// ============================================================================
// Path depth
// ============================================================================

fn deep_uri(depth: usize) -> String {
    format!("/{}.json", vec!["a"; depth].join("/"))
}

#[tokio::test]
async fn path_at_depth_limit_is_served() {
    let executor = Executor::new();

    let reply = send(&executor, Method::PUT, &deep_uri(MAX_DEPTH), "1").await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = send(&executor, Method::GET, "/.json", "").await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn very_deep_path_is_rejected_and_server_survives() {
    let executor = Executor::new();

    let reply = send(&executor, Method::PUT, &deep_uri(10_000), "1").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text(), PATH_TOO_DEEP);

    let reply = send(&executor, Method::GET, &deep_uri(MAX_DEPTH + 1), "").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = send(&executor, Method::GET, "/.json", "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), "null\n");
}

// ============================================================================
// DELETE
// ============================================================================

#[tokio::test]
async fn delete_removes_and_prunes() {
    let executor = Executor::new();
    set(&executor, "a/b/c", "1");

    let reply = send(&executor, Method::DELETE, "/a/b/c.json", "").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.is_empty());
    assert_eq!(get(&executor, ""), Value::Null);
    assert_eq!(executor.tree().lock().node_count(), 1);
}

#[tokio::test]
async fn delete_missing_path_succeeds() {
    let executor = Executor::new();
    let reply = send(&executor, Method::DELETE, "/nope.json", "").await;
    assert_eq!(reply.status, StatusCode::OK);
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn missing_suffix_is_forbidden() {
    let executor = Executor::new();

    let reply = send(&executor, Method::PUT, "/users/ada", r#"{"a": 1}"#).await;

    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.text(), MISSING_SUFFIX);
    assert!(executor.tree().lock().is_empty());
}

#[tokio::test]
async fn suffix_in_query_only_is_forbidden() {
    let executor = Executor::new();
    let reply = send(&executor, Method::GET, "/a?x=.json", "").await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn other_verbs_are_not_allowed() {
    let executor = Executor::new();

    let purge = Method::from_bytes(b"PURGE").unwrap();
    for method in [Method::OPTIONS, Method::TRACE, purge] {
        let reply = send(&executor, method.clone(), "/a.json", "").await;
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
    }
    assert!(executor.tree().lock().is_empty());
}
