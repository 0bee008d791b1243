//! The REST router.
//!
//! Every path is dynamic, so the whole surface is a single fallback handler
//! dispatching on the verb.
//!
//! | Verb | Command | Response body |
//! |------|---------|---------------|
//! | PUT | `Set` | request body, verbatim |
//! | PATCH | `Update` | request body, verbatim |
//! | POST | `Push` | `{"name":"<key>"}` + newline |
//! | GET | `Get` | projection + newline, `application/json` |
//! | DELETE | `Delete` | empty |

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower_http::trace::TraceLayer;

use firetest_executor::{Command, Executor, Path, Value};

use crate::rest::{self, RestError};

/// Build the router serving `executor`'s tree.
pub fn router(executor: Executor) -> Router {
    Router::new()
        .fallback(handle)
        .with_state(executor)
        .layer(TraceLayer::new_for_http())
}

async fn handle(
    State(executor): State<Executor>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    match dispatch(&executor, method, &uri, body) {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

fn dispatch(
    executor: &Executor,
    method: Method,
    uri: &Uri,
    body: Bytes,
) -> Result<Response, RestError> {
    let path = request_path(uri)?;

    match method {
        Method::PUT => {
            let value = decode(&body)?;
            executor.execute(Command::Set { path, value })?;
            Ok(rest::raw(body))
        }
        Method::PATCH => {
            let value = decode(&body)?;
            executor.execute(Command::Update { path, value })?;
            Ok(rest::raw(body))
        }
        Method::POST => {
            let value = decode(&body)?;
            let output = executor.execute(Command::Push { path, value })?;
            Ok(rest::raw(output.to_json_line()?))
        }
        Method::GET => {
            let output = executor.execute(Command::Get { path })?;
            Ok(rest::json(output.to_json_line()?))
        }
        Method::DELETE => {
            executor.execute(Command::Delete { path })?;
            Ok(rest::raw(Bytes::new()))
        }
        other => Err(RestError::MethodNotAllowed(other)),
    }
}

/// Decode a write payload. Nothing is executed unless this succeeds.
fn decode(body: &[u8]) -> Result<Value, RestError> {
    if body.is_empty() {
        return Err(RestError::NoData);
    }
    let json: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| RestError::InvalidData)?;
    Ok(Value::from(json))
}

/// Tree path a request URI addresses. The query string is ignored.
pub fn request_path(uri: &Uri) -> Result<Path, RestError> {
    rest::request_path(uri.path())
}
