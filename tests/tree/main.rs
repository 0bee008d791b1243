//! Tree Layer Tests
//!
//! Tests for the firetest-core tree model:
//! - Projection of nodes back to JSON values
//! - add/update/get/delete semantics, including pruning
//! - Push key generation

#[path = "../common/mod.rs"]
mod common;

mod projection;
