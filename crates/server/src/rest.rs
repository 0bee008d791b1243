//! REST conventions shared by the routes: path sanitization, the fixed
//! diagnostic bodies, and the mapping from request failures to responses.
//!
//! The `.json` suffix is checked on the URI path alone. A query string
//! after the suffix (`/a.json?print=pretty`) is accepted, where the Go
//! firetest checks the full request URI and answers 403.
//!
//! Paths are percent-decoded before they are split into segments, so
//! `/users/a%20b.json` addresses the key `a b`, and are limited to
//! [`MAX_DEPTH`] segments.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use firetest_executor::{Error, Path};

// =============================================================================
// Fixed bodies
// =============================================================================

/// Suffix every REST path must carry.
pub const JSON_SUFFIX: &str = ".json";

/// Deepest path a request may address.
pub const MAX_DEPTH: usize = 32;

/// Body of the 403 sent for paths without [`JSON_SUFFIX`].
pub const MISSING_SUFFIX: &str = "append .json to your request URI to use the REST API";

/// Body of the 400 sent when a write carries no payload.
pub const NO_DATA: &str = r#"{"error":"Error: No data supplied."}"#;

/// Body of the 400 sent when a payload cannot be stored.
pub const INVALID_DATA: &str = r#"{"error":"Invalid data; couldn't parse JSON object, array, or value. Perhaps you're using invalid characters in your key names."}"#;

/// Body of the 400 sent for paths deeper than [`MAX_DEPTH`].
pub const PATH_TOO_DEEP: &str = r#"{"error":"Invalid path; paths may be at most 32 levels deep."}"#;

/// Body of the 500 sent when a result cannot be encoded.
pub const INTERNAL_ERROR: &str = r#"{"error":"Internal error; the stored value could not be encoded."}"#;

// =============================================================================
// Paths
// =============================================================================

/// True if the request path carries the REST suffix. The query string is
/// not part of `uri_path`.
pub fn has_json_suffix(uri_path: &str) -> bool {
    uri_path.ends_with(JSON_SUFFIX)
}

/// Turn a request path into a tree path: surrounding `/` are trimmed, then
/// one trailing `.json` is removed.
///
/// ```
/// use firetest_server::rest::sanitize_path;
///
/// assert_eq!(sanitize_path("/users/alice.json").to_string(), "users/alice");
/// assert!(sanitize_path("/.json").is_root());
/// ```
pub fn sanitize_path(uri_path: &str) -> Path {
    let trimmed = uri_path.trim_matches('/');
    let stripped = trimmed.strip_suffix(JSON_SUFFIX).unwrap_or(trimmed);
    Path::from(stripped)
}

/// Tree path addressed by a raw (still percent-encoded) request path.
///
/// The suffix is checked before decoding, so an encoded `%2Ejson` does not
/// count. Invalid UTF-8 in the decoded bytes is replaced.
///
/// # Errors
///
/// [`RestError::MissingSuffix`] without the suffix and
/// [`RestError::PathTooDeep`] past [`MAX_DEPTH`] segments.
pub fn request_path(uri_path: &str) -> Result<Path, RestError> {
    if !has_json_suffix(uri_path) {
        return Err(RestError::MissingSuffix);
    }
    let decoded = urlencoding::decode_binary(uri_path.as_bytes());
    let path = sanitize_path(&String::from_utf8_lossy(&decoded));
    if path.len() > MAX_DEPTH {
        return Err(RestError::PathTooDeep { depth: path.len() });
    }
    Ok(path)
}

// =============================================================================
// Responses
// =============================================================================

/// A request rejected before or during execution.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Path lacks the `.json` suffix
    #[error("missing .json suffix")]
    MissingSuffix,

    /// Verb outside PUT, PATCH, POST, GET and DELETE
    #[error("method {0} not implemented")]
    MethodNotAllowed(Method),

    /// Path has more than [`MAX_DEPTH`] segments
    #[error("path is {depth} levels deep")]
    PathTooDeep {
        /// Segment count of the rejected path
        depth: usize,
    },

    /// Write with an empty body
    #[error("no data supplied")]
    NoData,

    /// Body is not valid JSON
    #[error("invalid JSON body")]
    InvalidData,

    /// The command failed
    #[error(transparent)]
    Execution(#[from] Error),
}

impl RestError {
    /// HTTP status for this rejection
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::MissingSuffix => StatusCode::FORBIDDEN,
            RestError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RestError::PathTooDeep { .. } | RestError::NoData | RestError::InvalidData => {
                StatusCode::BAD_REQUEST
            }
            RestError::Execution(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            RestError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> &'static str {
        match self {
            RestError::MissingSuffix => MISSING_SUFFIX,
            RestError::MethodNotAllowed(_) => "",
            RestError::PathTooDeep { .. } => PATH_TOO_DEEP,
            RestError::NoData => NO_DATA,
            RestError::InvalidData => INVALID_DATA,
            RestError::Execution(e) if e.is_client_error() => INVALID_DATA,
            RestError::Execution(_) => INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match &self {
            RestError::MethodNotAllowed(method) => {
                tracing::warn!(target: "firetest::rest", %method, "not implemented yet");
            }
            RestError::Execution(e) if !e.is_client_error() => {
                tracing::error!(target: "firetest::rest", error = %e, "failed to encode response");
            }
            other => {
                tracing::debug!(target: "firetest::rest", reason = %other, "request rejected");
            }
        }
        (self.status(), self.body()).into_response()
    }
}

/// Response carrying `bytes` as-is, with no content type.
pub fn raw(bytes: impl Into<Bytes>) -> Response {
    Response::new(Body::from(bytes.into()))
}

/// Response carrying a JSON document, labelled as such.
pub fn json(bytes: Vec<u8>) -> Response {
    let mut response = raw(bytes);
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
