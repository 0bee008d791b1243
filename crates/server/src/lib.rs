//! # Firetest Server
//!
//! Loopback REST surface over the firetest tree store. Paths must end in
//! `.json`; the verb picks the operation:
//!
//! | Verb | Operation |
//! |------|-----------|
//! | PUT | replace the subtree |
//! | PATCH | merge children |
//! | POST | store under a generated key |
//! | GET | read the projection |
//! | DELETE | remove and prune |
//!
//! ```no_run
//! use firetest_server::Firetest;
//!
//! # async fn demo() -> Result<(), firetest_server::ServerError> {
//! let mut ft = Firetest::new();
//! ft.start().await?;
//! // PUT {url}/users/alice.json ...
//! ft.close().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod error;
pub mod rest;
pub mod routes;
mod server;

pub use config::ServerConfig;
pub use error::ServerError;
pub use routes::router;
pub use server::Firetest;

pub use firetest_executor::{Command, Executor, Output, Path, Value};
