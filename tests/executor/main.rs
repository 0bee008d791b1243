//! Executor Layer Tests
//!
//! Tests for the firetest-executor crate which provides:
//! - Command enum - the instruction set
//! - Output enum - typed results
//! - Executor - dispatch over one shared, locked tree

#[path = "../common/mod.rs"]
mod common;

mod error_handling;
