//! Server lifecycle errors.

use std::net::SocketAddr;

/// Errors raised while configuring or starting the server.
///
/// Request-level failures never surface here; they are turned into HTTP
/// responses by [`RestError`](crate::rest::RestError).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No listen address could be bound
    #[error("failed to listen on {addr}: {reason}")]
    Bind {
        /// Last address tried
        addr: SocketAddr,
        /// Underlying cause
        reason: String,
    },

    /// Configuration file could not be read or parsed
    #[error("invalid config file '{path}': {reason}")]
    Config {
        /// File path
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// `start` was called on a running server
    #[error("server already started at {url}")]
    AlreadyStarted {
        /// URL of the running server
        url: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
