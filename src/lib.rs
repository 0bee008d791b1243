//! Firetest - in-process emulator of a realtime JSON tree database
//!
//! Firetest keeps a single JSON tree in memory and serves it over a loopback
//! REST surface, so client code can be integration-tested without a network
//! service.
//!
//! # Quick Start
//!
//! ```no_run
//! use firetest::{Command, Firetest, Value};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ft = Firetest::new();
//! ft.start().await?;
//!
//! // Seed the tree directly, then point the client under test at ft.url()
//! ft.executor().execute(Command::Set {
//!     path: "config/feature".into(),
//!     value: Value::Bool(true),
//! })?;
//!
//! ft.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! | Crate | Role |
//! |-------|------|
//! | `firetest-core` | node arena, tree operations, projection, key generation |
//! | `firetest-executor` | `Command`/`Output` instruction set over one locked tree |
//! | `firetest-server` | REST routes, configuration and the `Firetest` handle |

// Re-export the public API from firetest-server
pub use firetest_server::*;

pub use firetest_core::{Document, PushKeyGenerator, Tree};
pub use firetest_executor::Error;
